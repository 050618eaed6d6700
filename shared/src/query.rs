//! Analysis filter selection and its query string.

/// The five analysis filters, in the order they appear in the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Vehicle,
    Plate,
    Driver,
    Year,
    Month,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Vehicle,
        FilterField::Plate,
        FilterField::Driver,
        FilterField::Year,
        FilterField::Month,
    ];

    /// Query parameter understood by `GET /analise`
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::Vehicle => "veiculo",
            FilterField::Plate => "placa",
            FilterField::Driver => "motorista",
            FilterField::Year => "ano",
            FilterField::Month => "mes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Vehicle => "Veículo",
            FilterField::Plate => "Placa",
            FilterField::Driver => "Motorista",
            FilterField::Year => "Ano",
            FilterField::Month => "Mês",
        }
    }
}

/// Current filter selection; an empty string means "no selection"
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisFilters {
    pub veiculo: String,
    pub placa: String,
    pub motorista: String,
    pub ano: String,
    pub mes: String,
}

impl AnalysisFilters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Vehicle => &self.veiculo,
            FilterField::Plate => &self.placa,
            FilterField::Driver => &self.motorista,
            FilterField::Year => &self.ano,
            FilterField::Month => &self.mes,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Vehicle => self.veiculo = value,
            FilterField::Plate => self.placa = value,
            FilterField::Driver => self.motorista = value,
            FilterField::Year => self.ano = value,
            FilterField::Month => self.mes = value,
        }
    }

    /// Reset every selector to "no selection"
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }

    /// `veiculo=Caminh%C3%A3o%201&ano=2024`; empty selections are omitted
    pub fn to_query_string(&self) -> String {
        FilterField::ALL
            .iter()
            .filter_map(|field| {
                let value = self.get(*field).trim();
                if value.is_empty() {
                    None
                } else {
                    Some(format!("{}={}", field.key(), urlencoding::encode(value)))
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Path for `GET /analise` relative to the API base
    pub fn analysis_path(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            "/analise".to_string()
        } else {
            format!("/analise?{}", query)
        }
    }
}

/// Month selector options, "01".."12" paired with their pt-BR names
pub fn month_options() -> Vec<(String, String)> {
    const NAMES: [&str; 12] = [
        "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
        "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
    ];
    NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| (format!("{:02}", i + 1), name.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encodes_and_omits_empty() {
        let mut filters = AnalysisFilters::default();
        filters.set(FilterField::Vehicle, "Caminhão 1");
        filters.set(FilterField::Year, "2024");
        assert_eq!(filters.to_query_string(), "veiculo=Caminh%C3%A3o%201&ano=2024");
        assert_eq!(filters.analysis_path(), "/analise?veiculo=Caminh%C3%A3o%201&ano=2024");
    }

    #[test]
    fn test_no_filters_means_no_query() {
        let filters = AnalysisFilters::default();
        assert!(filters.is_empty());
        assert_eq!(filters.analysis_path(), "/analise");
    }

    #[test]
    fn test_fixed_key_order() {
        let mut filters = AnalysisFilters::default();
        filters.set(FilterField::Month, "03");
        filters.set(FilterField::Driver, "Maria Santos");
        filters.set(FilterField::Plate, "XYZ-5678");
        assert_eq!(
            filters.to_query_string(),
            "placa=XYZ-5678&motorista=Maria%20Santos&mes=03"
        );
    }

    #[test]
    fn test_clear_resets_every_field() {
        let mut filters = AnalysisFilters::default();
        for field in FilterField::ALL {
            filters.set(field, "x");
        }
        filters.clear();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_month_options() {
        let months = month_options();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], ("01".to_string(), "Janeiro".to_string()));
    }
}
