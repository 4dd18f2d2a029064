mod loader;
mod resolve;
