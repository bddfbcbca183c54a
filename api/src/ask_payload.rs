use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Deserializer};

// Body of `POST /ask`, accepted as JSON or as an urlencoded form.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct AskPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub question: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[async_trait]
impl<S> FromRequest<S> for AskPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(payload) = Json::<AskPayload>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(payload);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(payload) = Form::<AskPayload>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(payload);
        }

        // Unparsed bodies leave the question empty.
        Ok(AskPayload::default())
    }
}
