use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub discord_name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::afk_status::Entity")]
    AfkStatus,
    #[sea_orm(has_many = "super::call_session::Entity")]
    CallSession,
    #[sea_orm(has_many = "super::spam_stats::Entity")]
    SpamStats,
    #[sea_orm(has_many = "super::finance::Entity")]
    Finance,
    #[sea_orm(has_many = "super::due_item::Entity")]
    DueItem,
    #[sea_orm(has_many = "super::game_preference::Entity")]
    GamePreference,
}

impl Related<super::afk_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AfkStatus.def()
    }
}

impl Related<super::call_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CallSession.def()
    }
}

impl Related<super::spam_stats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpamStats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
