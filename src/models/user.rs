use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::validate_email_domain;

/// Documento da collection "users"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl User {
    pub fn new(id: ObjectId, fields: UserFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
        }
    }
}

/// The four caller-supplied fields of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UserFields {
    #[validate(length(min = 1, message = "\"first_name\" is not allowed to be empty"))]
    #[schema(example = "Ada")]
    pub first_name: String,
    #[validate(length(min = 1, message = "\"last_name\" is not allowed to be empty"))]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[validate(
        length(min = 1, message = "\"email\" is not allowed to be empty"),
        email(message = "\"email\" must be a valid email"),
        custom(function = "validate_email_domain")
    )]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "\"phone\" is not allowed to be empty"))]
    #[schema(example = "+44 20 7946 0000")]
    pub phone: String,
}

/// User as returned over HTTP (`_id` exposed as hex `id`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = "65f1c0ffee00000000000001")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
        }
    }
}
