use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct LoginForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 128)]
    pub username: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 256)]
    pub password: String,
}
