pub use super::blacklisted_word::Entity as BlacklistedWord;
pub use super::guild_member_gate::Entity as GuildMemberGate;
pub use super::guild_member_gate_question::Entity as GuildMemberGateQuestion;
pub use super::member_gate_question::Entity as MemberGateQuestion;
pub use super::welcome_message::Entity as WelcomeMessage;
