//! Modelo de Usuario
//!
//! Este módulo contiene el struct Usuario y el rol con el que se autoriza
//! cada petición.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Rol de un usuario tal como se guarda en `usuarios.rol`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Usuario,
    Cliente,
    Propietario,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Usuario => "usuario",
            UserRole::Cliente => "cliente",
            UserRole::Propietario => "propietario",
            UserRole::Admin => "admin",
        }
    }

    /// `usuario` y `cliente` son el mismo rol con dos nombres
    pub fn is_client(&self) -> bool {
        matches!(self, UserRole::Usuario | UserRole::Cliente)
    }

    pub fn is_admin(&self) -> bool {
        *self == UserRole::Admin
    }

    /// Propietarios y administradores gestionan espacios
    pub fn can_manage_venues(&self) -> bool {
        matches!(self, UserRole::Propietario | UserRole::Admin)
    }

    /// Dashboard al que se redirige tras iniciar sesión
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            UserRole::Admin => "/dashboard/admin",
            UserRole::Propietario => "/dashboard/propietario",
            UserRole::Usuario | UserRole::Cliente => "/dashboard/cliente",
        }
    }

    /// Roles que un visitante puede elegir al registrarse
    pub fn is_self_assignable(&self) -> bool {
        !self.is_admin()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usuario" => Ok(UserRole::Usuario),
            "cliente" => Ok(UserRole::Cliente),
            "propietario" => Ok(UserRole::Propietario),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("rol desconocido: {}", other)),
        }
    }
}

/// Usuario - mapea exactamente a la tabla usuarios
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub rol: String,
    pub telefono: Option<String>,
    pub foto_perfil: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Un rol desconocido en base de datos se trata como el de menor privilegio
    pub fn role(&self) -> UserRole {
        self.rol.parse().unwrap_or_else(|e| {
            tracing::warn!("⚠️ Usuario {} con {}", self.id, e);
            UserRole::Usuario
        })
    }
}

/// Response de usuario para la API (sin password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: Option<String>,
    pub email: String,
    pub rol: UserRole,
    pub telefono: Option<String>,
    pub foto_perfil: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let rol = user.role();
        Self {
            id: user.id,
            nombre: user.nombre,
            apellido: user.apellido,
            email: user.email,
            rol,
            telefono: user.telefono,
            foto_perfil: user.foto_perfil,
            created_at: user.created_at,
        }
    }
}
