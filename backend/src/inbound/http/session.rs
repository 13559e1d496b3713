//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the authenticated identity,
//! checking the required role, and queueing flash notices.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Role, User, UserId, Username};

use super::flash::FlashMessage;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const ROLE_KEY: &str = "role";
pub(crate) const FLASH_KEY: &str = "_flash";

/// Authenticated identity carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub username: Username,
    pub role: Role,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's identity in the session cookie.
    pub fn persist_identity(&self, user: &User) -> Result<(), Error> {
        self.insert(USER_ID_KEY, user.id.0)?;
        self.insert(USERNAME_KEY, user.username.as_str())?;
        self.insert(ROLE_KEY, user.role.as_str())
    }

    /// Fetch the current identity, `None` when anonymous.
    ///
    /// A tampered or stale cookie (unparsable role, missing fields) is
    /// treated as anonymous rather than an error.
    pub fn identity(&self) -> Result<Option<SessionIdentity>, Error> {
        let user_id = self.get::<i32>(USER_ID_KEY)?;
        let username = self.get::<String>(USERNAME_KEY)?;
        let role = self.get::<String>(ROLE_KEY)?;
        let (Some(user_id), Some(username), Some(role)) = (user_id, username, role) else {
            return Ok(None);
        };
        let Ok(username) = Username::new(&username) else {
            warn!("invalid username in session cookie");
            return Ok(None);
        };
        let Ok(role) = role.parse::<Role>() else {
            warn!("invalid role in session cookie");
            return Ok(None);
        };
        Ok(Some(SessionIdentity {
            user_id: UserId(user_id),
            username,
            role,
        }))
    }

    /// Require an authenticated identity with the given role.
    ///
    /// Anonymous callers get `401 Unauthorized`; authenticated callers with
    /// a different role get `403 Forbidden`.
    pub fn require_role(&self, role: Role) -> Result<SessionIdentity, Error> {
        let identity = self
            .identity()?
            .ok_or_else(|| Error::unauthorized("login required"))?;
        if identity.role != role {
            return Err(Error::forbidden(format!("{role} role required")));
        }
        Ok(identity)
    }

    /// Remove all session state, returning the caller to anonymous.
    pub fn clear(&self) {
        self.0.clear();
    }

    /// Queue a flash notice for the next rendered view.
    pub fn push_notice(&self, notice: FlashMessage) -> Result<(), Error> {
        let mut queued = self
            .get::<Vec<FlashMessage>>(FLASH_KEY)?
            .unwrap_or_default();
        queued.push(notice);
        self.insert(FLASH_KEY, queued)
    }

    /// Drain all queued flash notices.
    pub fn take_notices(&self) -> Result<Vec<FlashMessage>, Error> {
        let queued = self
            .get::<Vec<FlashMessage>>(FLASH_KEY)?
            .unwrap_or_default();
        self.0.remove(FLASH_KEY);
        Ok(queued)
    }

    fn insert<T: serde::Serialize>(&self, key: &str, value: T) -> Result<(), Error> {
        self.0
            .insert(key, value)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        self.0
            .get::<T>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::{EmailAddress, PasswordDigest};

    fn fixture_user(role: Role) -> User {
        User {
            id: UserId(7),
            username: Username::new("ada").expect("fixture username"),
            email: EmailAddress::new("ada@example.com").expect("fixture email"),
            password_digest: PasswordDigest::from_phc_string("$argon2id$fixture"),
            role,
            created_at: NaiveDateTime::default(),
        }
    }

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(super::super::test_utils::test_session_middleware())
    }

    #[actix_web::test]
    async fn round_trips_identity() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_identity(&fixture_user(Role::Recruiter))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let identity = session.require_role(Role::Recruiter)?;
                        Ok::<_, Error>(
                            HttpResponse::Ok().body(identity.username.as_str().to_owned()),
                        )
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "ada");
    }

    #[actix_web::test]
    async fn missing_identity_is_unauthorised() {
        let app = test::init_service(session_test_app().route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                let _ = session.require_role(Role::Candidate)?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn role_mismatch_is_forbidden() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_identity(&fixture_user(Role::Candidate))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/recruiters-only",
                    web::get().to(|session: SessionContext| async move {
                        let _ = session.require_role(Role::Recruiter)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/recruiters-only")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn notices_drain_once() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/queue",
                    web::get().to(|session: SessionContext| async move {
                        session.push_notice(FlashMessage::success("done"))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/drain",
                    web::get().to(|session: SessionContext| async move {
                        let notices = session.take_notices()?;
                        Ok::<_, Error>(HttpResponse::Ok().json(notices))
                    }),
                ),
        )
        .await;

        let queue_res =
            test::call_service(&app, test::TestRequest::get().uri("/queue").to_request()).await;
        let cookie = queue_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let drain_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/drain")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let notices: Vec<FlashMessage> = test::read_body_json(drain_res).await;
        assert_eq!(notices, vec![FlashMessage::success("done")]);
    }
}
