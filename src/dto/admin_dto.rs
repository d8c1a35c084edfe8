use serde::Deserialize;

pub const DEFAULT_LIMITE_USUARIOS: i64 = 5;
pub const MAX_LIMITE_USUARIOS: i64 = 50;

// Query de `GET /api/admin/usuarios-recientes`
#[derive(Debug, Default, Deserialize)]
pub struct UsuariosRecientesQuery {
    pub limite: Option<i64>,
}

impl UsuariosRecientesQuery {
    pub fn limite(&self) -> i64 {
        self.limite
            .unwrap_or(DEFAULT_LIMITE_USUARIOS)
            .clamp(1, MAX_LIMITE_USUARIOS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limite_is_clamped() {
        assert_eq!(UsuariosRecientesQuery::default().limite(), DEFAULT_LIMITE_USUARIOS);
        assert_eq!(UsuariosRecientesQuery { limite: Some(0) }.limite(), 1);
        assert_eq!(UsuariosRecientesQuery { limite: Some(999) }.limite(), MAX_LIMITE_USUARIOS);
    }
}
