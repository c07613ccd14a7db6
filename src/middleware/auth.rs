//! Middleware de autenticación JWT
//!
//! Verifica los tokens emitidos por el servicio de autenticación externo e
//! inyecta el administrador autenticado en las extensiones del request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{
    models::admin::AdminRole,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{verify_token, JwtConfig},
    },
};

/// Administrador autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub auth_uid: String,
    pub role: AdminRole,
}

fn authenticate(state: &AppState, request: &Request) -> Result<AuthenticatedAdmin, AppError> {
    // Extraer token del header Authorization
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let claims = verify_token(token, &JwtConfig::from(&state.config))?;

    let role = claims
        .role
        .parse::<AdminRole>()
        .map_err(|_| AppError::Forbidden(format!("Rol '{}' no autorizado", claims.role)))?;

    debug!("🔐 Request autenticado: {} ({})", claims.sub, role.as_str());
    Ok(AuthenticatedAdmin {
        auth_uid: claims.sub,
        role,
    })
}

/// Requiere rol `admin` o `editor`
pub async fn require_staff(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let admin = authenticate(&state, &request)?;
    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}

/// Requiere rol `admin`
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let admin = authenticate(&state, &request)?;
    if admin.role != AdminRole::Admin {
        return Err(AppError::Forbidden(
            "Se requiere rol de administrador".to_string(),
        ));
    }
    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}
