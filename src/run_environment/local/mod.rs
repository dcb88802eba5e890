mod provider;

pub use provider::LocalProvider;
