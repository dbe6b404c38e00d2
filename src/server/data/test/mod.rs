mod channel_message;
mod firm;
mod receipt;
