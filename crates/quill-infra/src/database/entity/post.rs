//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Integer")]
    pub id: i64,
    #[sea_orm(indexed)]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub author_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Combine a stored post with its joined author into a Domain Post.
    pub fn into_domain(self, author: super::user::Model) -> quill_core::domain::Post {
        quill_core::domain::Post {
            id: self.id,
            title: self.title,
            body: self.body,
            author_id: self.author_id,
            author: author.into(),
        }
    }
}

/// Conversion from Domain NewPost to an insertable ActiveModel.
impl From<quill_core::domain::NewPost> for ActiveModel {
    fn from(post: quill_core::domain::NewPost) -> Self {
        Self {
            id: NotSet,
            title: Set(post.title),
            body: Set(post.body),
            author_id: Set(post.author_id),
        }
    }
}
