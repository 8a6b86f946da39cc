mod blacklisted_word;
mod gate_question;
mod member_gate;
mod pending_question;
mod welcome_message;
