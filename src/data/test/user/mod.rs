use crate::{data::user::UserRepository, error::AppError, model::user::UpsertUserParam};
use test_utils::{builder::TestBuilder, factory};

mod find_by_id;
mod get_or_create;
mod upsert;
