pub use super::channel_message::Entity as ChannelMessage;
pub use super::firm::Entity as Firm;
pub use super::firm_access_role::Entity as FirmAccessRole;
pub use super::receipt::Entity as Receipt;
