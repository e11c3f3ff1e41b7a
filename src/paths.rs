// src/paths.rs
//! Маршруты дашборда. Все пути строятся от одного корня,
//! чтобы редиректы после мутаций не расходились между экранами.

pub const ROOTS_DASHBOARD: &str = "/dashboard";

/// Склеивает корень и подссылку без нормализации слэшей.
pub fn path(root: &str, sublink: &str) -> String {
    format!("{}{}", root, sublink)
}

/// Куда попадает пользователь сразу после логина.
pub fn after_login() -> String {
    dashboard::app()
}

pub mod dashboard {
    use super::{path, ROOTS_DASHBOARD};

    pub fn root() -> String {
        ROOTS_DASHBOARD.to_string()
    }

    pub fn app() -> String {
        path(ROOTS_DASHBOARD, "/app")
    }

    pub mod products {
        use super::super::{path, ROOTS_DASHBOARD};

        pub fn root() -> String {
            path(ROOTS_DASHBOARD, "/products")
        }

        pub fn create() -> String {
            path(ROOTS_DASHBOARD, "/products/create")
        }

        pub fn edit(id: &str) -> String {
            path(ROOTS_DASHBOARD, &format!("/products/{}/edit", id))
        }
    }

    pub mod employees {
        use super::super::{path, ROOTS_DASHBOARD};

        pub fn root() -> String {
            path(ROOTS_DASHBOARD, "/employees")
        }

        pub fn create() -> String {
            path(ROOTS_DASHBOARD, "/employees/create")
        }
    }

    pub mod categories {
        use super::super::{path, ROOTS_DASHBOARD};

        pub fn root() -> String {
            path(ROOTS_DASHBOARD, "/categories")
        }
    }

    pub mod maintenance_requests {
        use super::super::{path, ROOTS_DASHBOARD};

        pub fn root() -> String {
            path(ROOTS_DASHBOARD, "/maintenance-requests")
        }
    }
}
