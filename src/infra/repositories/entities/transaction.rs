//! Transaction database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Transaction, TransactionType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Uuid,
    /// Unsigned magnitude; never stored with a sign
    pub amount: Decimal,
    pub transaction_type: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Transaction {
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            transaction_type: TransactionType::from(model.transaction_type.as_str()),
            created_at: model.created_at,
        }
    }
}
