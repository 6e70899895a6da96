use axum::async_trait;
use axum::body::Bytes;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{FromRequest, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::reply::Failure;

/// Request body decoded from JSON or an HTML form, whichever the client sent.
///
/// A blank body is read from the query string, so a bare `DELETE ?_id=..`
/// or an empty JSON body behaves like `{}` plus the query. Only JSON that
/// does not parse at all is answered with a 4xx; a body that parses but does
/// not fit the request shape is reported with status 200 like any other
/// failed operation.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| {
                value
                    .to_ascii_lowercase()
                    .starts_with("application/x-www-form-urlencoded")
            });

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(form_failure)?;
            return Ok(Payload(value));
        }

        let uri = req.uri().clone();
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|r| Failure::rejected(r.status(), r.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            let Query(value) =
                Query::<T>::try_from_uri(&uri).map_err(|r| Failure::unusable(r.body_text()))?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_bytes(&bytes).map_err(json_failure)?;
            Ok(Payload(value))
        }
    }
}

fn json_failure(rejection: JsonRejection) -> Failure {
    if matches!(rejection, JsonRejection::JsonSyntaxError(_)) {
        Failure::rejected(rejection.status(), rejection.body_text())
    } else {
        Failure::unusable(rejection.body_text())
    }
}

fn form_failure(rejection: FormRejection) -> Failure {
    match rejection {
        FormRejection::FailedToDeserializeForm(_) | FormRejection::FailedToDeserializeFormBody(_) => {
            Failure::unusable(rejection.body_text())
        }
        other => Failure::rejected(other.status(), other.body_text()),
    }
}
