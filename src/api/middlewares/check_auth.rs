use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{self, Service, ServiceRequest, ServiceResponse, Transform},
    web::Data,
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;

use crate::{components::app::AppComponents, domain::error::CommonError};

/// Resolves the bearer token of requests to `auth_routes` into a
/// [`crate::domain::user_id::UserId`] stored in the request extensions.
pub struct CheckAuthToken {
    auth_routes: Vec<String>,
}

impl CheckAuthToken {
    pub fn new(auth_routes: Vec<String>) -> Self {
        CheckAuthToken { auth_routes }
    }
}

impl<S: 'static, B> Transform<S, ServiceRequest> for CheckAuthToken
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CheckAuthTokenMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CheckAuthTokenMiddleware {
            service: Rc::new(service),
            auth_routes: self.auth_routes.clone(),
        }))
    }
}
pub struct CheckAuthTokenMiddleware<S> {
    service: Rc<S>,
    auth_routes: Vec<String>,
}

const AUTH_TOKEN_HEADER: &str = "authorization";

fn is_auth_route(routes: &[String], path: &str) -> bool {
    routes.iter().any(|x| *x == path)
}

pub(crate) fn extract_bearer_token(request: &ServiceRequest) -> Option<String> {
    let header = request.headers().get(AUTH_TOKEN_HEADER)?.to_str().ok()?;
    let mut parts = header.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

impl<S: 'static, B> Service<ServiceRequest> for CheckAuthTokenMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    dev::forward_ready!(service);

    fn call(&self, request: ServiceRequest) -> Self::Future {
        let is_metrics_call = request.path().eq_ignore_ascii_case("/metrics");
        let matched_route = request.match_pattern();

        let matched_route = match matched_route {
            Some(route) => route,
            None if is_metrics_call => {
                let res = self.service.call(request);
                return Box::pin(async { res.await.map(ServiceResponse::map_into_left_body) });
            }
            None => {
                let (request, _pl) = request.into_parts();
                let response = HttpResponse::from_error(CommonError::NotFound("".to_owned()))
                    .map_into_right_body();
                return Box::pin(async { Ok(ServiceResponse::new(request, response)) });
            }
        };

        if !is_auth_route(&self.auth_routes, &matched_route) {
            let res = self.service.call(request);
            return Box::pin(async { res.await.map(ServiceResponse::map_into_left_body) });
        }

        let token = match extract_bearer_token(&request) {
            Some(token) => token,
            None => {
                let (request, _pl) = request.into_parts();

                let response = HttpResponse::from_error(CommonError::BadRequest(
                    "Missing authorization token".to_string(),
                ))
                .map_into_right_body();

                return Box::pin(async { Ok(ServiceResponse::new(request, response)) });
            }
        };

        let svc = self.service.clone();
        Box::pin(async move {
            let identity = request
                .app_data::<Data<AppComponents>>()
                .map(|components| components.identity.clone());

            let identity = match identity {
                Some(identity) => identity,
                None => {
                    log::error!("check_auth.rs > AppComponents missing from app data");
                    let (request, _pl) = request.into_parts();
                    let response = HttpResponse::from_error(CommonError::Unknown("".to_owned()))
                        .map_into_right_body();
                    return Ok(ServiceResponse::new(request, response));
                }
            };

            match identity.who_am_i(&token).await {
                Ok(user_id) => {
                    request.extensions_mut().insert(user_id);

                    let res = svc.call(request);
                    res.await.map(ServiceResponse::map_into_left_body)
                }
                Err(err) => {
                    log::debug!("check_auth.rs > Couldn't resolve token: {err}");
                    let (request, _pl) = request.into_parts();
                    let response = HttpResponse::from_error(err).map_into_right_body();
                    Ok(ServiceResponse::new(request, response))
                }
            }
        })
    }
}
