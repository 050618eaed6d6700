//! KPI cards and warranty banners for the summary panel.

use chrono::NaiveDate;

use crate::format::{format_currency, format_month_long};
use crate::Dashboard;

#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub description: String,
    /// Extra card class ("alert" or "success") when the card carries a state
    pub state_class: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Warning,
}

impl BannerKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Error => "alert-error",
            BannerKind::Warning => "alert-warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub heading: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: Vec<KpiCard>,
    pub banners: Vec<Banner>,
}

impl DashboardView {
    /// Build the panel; `today` supplies the "this month" caption
    pub fn new(dashboard: &Dashboard, today: NaiveDate) -> Self {
        let resumo = &dashboard.resumo;
        let alertas = &dashboard.alertas;

        let cards = vec![
            KpiCard {
                title: "Total Gastos",
                value: format_currency(resumo.total_gastos),
                description: "Acumulado geral".to_string(),
                state_class: None,
            },
            KpiCard {
                title: "Total Diárias",
                value: format_currency(resumo.total_diarias),
                description: "Valor total em diárias".to_string(),
                state_class: None,
            },
            KpiCard {
                title: "Gastos Este Mês",
                value: format_currency(resumo.gastos_mes_atual),
                description: format_month_long(today),
                state_class: None,
            },
            KpiCard {
                title: "Garantias Vencidas",
                value: alertas.servicos_vencidos.to_string(),
                description: "Serviços com garantia expirada".to_string(),
                state_class: Some(if alertas.servicos_vencidos > 0 { "alert" } else { "success" }),
            },
            KpiCard {
                title: "Veículos na Frota",
                value: resumo.total_veiculos.to_string(),
                description: "Placas cadastradas".to_string(),
                state_class: None,
            },
            KpiCard {
                title: "Motoristas",
                value: resumo.total_motoristas.to_string(),
                description: "Cadastrados no sistema".to_string(),
                state_class: None,
            },
        ];

        let mut banners = Vec::new();
        if alertas.servicos_vencidos > 0 {
            banners.push(Banner {
                kind: BannerKind::Error,
                heading: "⚠️ Atenção!",
                message: format!(
                    "Existem {} serviços com garantia vencida. Verifique a aba \"Manutenção e Garantias\" para mais detalhes.",
                    alertas.servicos_vencidos
                ),
            });
        }
        if alertas.servicos_sem_garantia > 0 {
            banners.push(Banner {
                kind: BannerKind::Warning,
                heading: "📝 Observação:",
                message: format!(
                    "{} serviços não possuem data de garantia cadastrada.",
                    alertas.servicos_sem_garantia
                ),
            });
        }

        Self { cards, banners }
    }

    pub fn banners_of(&self, kind: BannerKind) -> impl Iterator<Item = &Banner> {
        self.banners.iter().filter(move |b| b.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DashboardAlerts;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn with_alerts(vencidos: u32, sem_garantia: u32) -> Dashboard {
        Dashboard {
            alertas: DashboardAlerts { servicos_vencidos: vencidos, servicos_sem_garantia: sem_garantia },
            ..Default::default()
        }
    }

    #[test]
    fn test_no_expired_services_no_error_banner() {
        let view = DashboardView::new(&with_alerts(0, 0), today());
        assert!(view.banners.is_empty());
        assert_eq!(view.cards[3].state_class, Some("success"));
    }

    #[test]
    fn test_expired_services_exactly_one_banner() {
        for n in [1u32, 2, 17] {
            let view = DashboardView::new(&with_alerts(n, 0), today());
            let errors: Vec<_> = view.banners_of(BannerKind::Error).collect();
            assert_eq!(errors.len(), 1);
            assert!(errors[0].message.contains(&n.to_string()));
            assert_eq!(view.cards[3].state_class, Some("alert"));
        }
    }

    #[test]
    fn test_missing_warranty_warning() {
        let view = DashboardView::new(&with_alerts(0, 4), today());
        assert_eq!(view.banners.len(), 1);
        assert_eq!(view.banners[0].kind, BannerKind::Warning);
        assert!(view.banners[0].message.starts_with("4 serviços"));
    }

    #[test]
    fn test_cards() {
        let mut dashboard = with_alerts(0, 0);
        dashboard.resumo.total_gastos = 530.5;
        dashboard.resumo.total_veiculos = 3;
        let view = DashboardView::new(&dashboard, today());
        assert_eq!(view.cards.len(), 6);
        assert_eq!(view.cards[0].value, "R$ 530.50");
        assert_eq!(view.cards[2].description, "março de 2024");
        assert_eq!(view.cards[4].value, "3");
    }
}
