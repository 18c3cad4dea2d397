use serde::{Deserialize, Serialize};
use utoipa::{IntoResponses, ToSchema};

#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema, IntoResponses, PartialEq, Eq)]
#[response(status = 200, description = "OK")]
pub struct Statistics {
    #[schema(example = 12)]
    pub users: u64,
    #[schema(example = 5)]
    pub books: u64,
    #[schema(example = 40)]
    pub comments: u64,
}
