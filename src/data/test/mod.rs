mod afk;
mod call_session;
mod settings;
mod spam_stats;
mod user;
