mod channel;
mod node;
