mod common;
mod scoring;
mod tax;
