mod api_client;
mod app;
mod config;
mod error;
mod local_logger;
mod logger;
mod prelude;
mod request_client;
mod run_environment;
#[cfg(test)]
mod test_server;
mod upload;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let provider = run_environment::get_provider();
    let res = crate::app::run(provider.as_ref()).await;
    if let Err(err) = res {
        log::logger().flush();
        provider.report_failure(&format!("{err:#}"));
        std::process::exit(1);
    }
}
