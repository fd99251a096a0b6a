mod config;
mod coordinator;
mod extractor;
mod messaging;
