// src/common/pagination.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Parâmetros de paginação aceitos por todas as rotas de listagem.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        // Math.ceil(total / limit); lista vazia tem zero páginas
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self { page, limit, total, total_pages }
    }
}

/// Envelope padrão das listagens: `{ data, pagination }`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self { data, pagination: PaginationMeta::new(page, limit, total) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_aplicados_quando_ausentes() {
        let q = PaginationQuery { page: None, limit: None };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 20);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn offset_calculado_a_partir_da_pagina() {
        let q = PaginationQuery { page: Some(3), limit: Some(10) };
        assert_eq!(q.offset(), 20);
    }

    #[test]
    fn pagina_minima_e_um() {
        let q = PaginationQuery { page: Some(0), limit: Some(-5) };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 1);
    }

    #[test]
    fn total_pages_arredonda_para_cima() {
        assert_eq!(PaginationMeta::new(1, 20, 41).total_pages, 3);
        assert_eq!(PaginationMeta::new(1, 20, 40).total_pages, 2);
        assert_eq!(PaginationMeta::new(1, 20, 1).total_pages, 1);
    }

    #[test]
    fn lista_vazia_tem_zero_paginas() {
        assert_eq!(PaginationMeta::new(1, 20, 0).total_pages, 0);
    }
}
