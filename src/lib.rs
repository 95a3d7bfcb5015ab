pub mod channel;
pub mod coding;
pub mod driver;
pub mod error;
pub mod frame;
pub mod journal;
pub mod node;

#[cfg(test)]
mod test;
