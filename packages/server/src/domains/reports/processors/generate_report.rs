//! Report aggregation - full scan over pets and orders plus a store
//! inventory snapshot.
//!
//! Result sets are materialized in full; there is no pagination cursor kept
//! between steps. The store inventory call is not on the critical path and
//! falls back to an empty (zero) snapshot when the upstream is unreachable.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{info, warn};
use turnstile::{
    Condition, EntityService, LifecycleEntity, ProcessContext, ProcessError, ProcessOutcome,
    Processor,
};

use crate::domains::orders::models::Order;
use crate::domains::pets::models::{AdoptionStatus, Pet};
use crate::domains::reports::models::{
    CategoryStats, PerformanceReport, ReportStatistics, RestockRecommendation, RestockUrgency,
};
use crate::kernel::ServerDeps;

/// Categories with at most this many units sold are slow movers.
const SLOW_MOVER_MAX_UNITS: u32 = 0;

/// Restock tiers by remaining availability.
const RESTOCK_MEDIUM_AT: u32 = 2;
const RESTOCK_LOW_AT: u32 = 5;

const TOP_PERFORMER_COUNT: usize = 5;

pub struct GenerateReportProcessor;

#[async_trait]
impl Processor<PerformanceReport, ServerDeps> for GenerateReportProcessor {
    fn name(&self) -> &'static str {
        "GenerateReportProcessor"
    }

    async fn process(
        &self,
        mut report: PerformanceReport,
        ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<PerformanceReport>, ProcessError> {
        let service = ctx.service();

        let pets: Vec<Pet> = decode_all(service.find_all(Pet::KIND).await?);
        let orders: Vec<Order> = decode_all(service.find_all(Order::KIND).await?);
        let delivered: Vec<Order> = decode_all(
            service
                .search(Order::KIND, &Condition::eq("complete", true))
                .await?,
        );

        // Conservative fallback: an unreachable store reads as zero stock.
        let store_inventory = match ctx.deps.petstore.store_inventory().await {
            Ok(inventory) => inventory,
            Err(e) => {
                warn!(error = %e, "Store inventory unavailable; assuming zero stock");
                Default::default()
            }
        };

        let category_of = |pet: &Pet| -> String {
            pet.category
                .clone()
                .unwrap_or_else(|| "uncategorized".to_string())
        };

        let total_pets = pets.len() as u32;
        let available_pets = pets
            .iter()
            .filter(|p| p.adoption_status == AdoptionStatus::Available)
            .count() as u32;

        let total_revenue: f64 = delivered.iter().filter_map(|o| o.total_amount).sum();
        let average_order_value = if delivered.is_empty() {
            0.0
        } else {
            total_revenue / delivered.len() as f64
        };

        // Per-category rollup. BTreeMap keeps report ordering stable.
        let mut categories: BTreeMap<String, CategoryStats> = BTreeMap::new();
        for pet in &pets {
            let entry = categories
                .entry(category_of(pet))
                .or_insert_with_key(|category| CategoryStats {
                    category: category.clone(),
                    pet_count: 0,
                    available_pets: 0,
                    units_sold: 0,
                    revenue: 0.0,
                });
            entry.pet_count += 1;
            if pet.adoption_status == AdoptionStatus::Available {
                entry.available_pets += 1;
            }
        }
        for order in &delivered {
            let Some(pet) = pets.iter().find(|p| p.id == order.pet_id) else {
                warn!(order_id = %order.id, "Delivered order references an unknown pet");
                continue;
            };
            if let Some(entry) = categories.get_mut(&category_of(pet)) {
                entry.units_sold += order.quantity;
                entry.revenue += order.total_amount.unwrap_or(0.0);
            }
        }
        let categories: Vec<CategoryStats> = categories.into_values().collect();

        let mut top_performers = categories.clone();
        top_performers.sort_by(|a, b| b.units_sold.cmp(&a.units_sold));
        top_performers.truncate(TOP_PERFORMER_COUNT);
        top_performers.retain(|c| c.units_sold > 0);

        let slow_movers: Vec<String> = categories
            .iter()
            .filter(|c| c.units_sold <= SLOW_MOVER_MAX_UNITS)
            .map(|c| c.category.clone())
            .collect();

        let restock: Vec<RestockRecommendation> = categories
            .iter()
            .filter_map(|c| {
                let urgency = if c.available_pets == 0 {
                    RestockUrgency::High
                } else if c.available_pets <= RESTOCK_MEDIUM_AT {
                    RestockUrgency::Medium
                } else if c.available_pets <= RESTOCK_LOW_AT {
                    RestockUrgency::Low
                } else {
                    return None;
                };
                Some(RestockRecommendation {
                    category: c.category.clone(),
                    available: c.available_pets,
                    urgency,
                })
            })
            .collect();

        let sold_units: u32 = categories.iter().map(|c| c.units_sold).sum();
        let trend_summary = format!(
            "{} units sold across {} categories for {:.2} in revenue; {} of {} pets remain available",
            sold_units,
            categories.len(),
            total_revenue,
            available_pets,
            total_pets
        );

        let mut recommendations = Vec::new();
        for r in &restock {
            if r.urgency == RestockUrgency::High {
                recommendations.push(format!(
                    "Restock {} immediately: no animals left available",
                    r.category
                ));
            }
        }
        if !slow_movers.is_empty() {
            recommendations.push(format!(
                "Consider promotions for slow-moving categories: {}",
                slow_movers.join(", ")
            ));
        }

        report.statistics = Some(ReportStatistics {
            total_pets,
            available_pets,
            total_orders: orders.len() as u32,
            delivered_orders: delivered.len() as u32,
            total_revenue,
            average_order_value,
            store_inventory,
            categories,
            top_performers,
            slow_movers,
            restock,
            trend_summary,
            recommendations,
        });
        report.generated_at = Some(Utc::now());

        info!(
            report_id = %report.id,
            total_pets,
            total_orders = orders.len(),
            revenue = total_revenue,
            "Report aggregated"
        );
        Ok(ProcessOutcome::new(report))
    }
}

/// Decode every document of a scan, skipping (and logging) any that no
/// longer match the current schema.
fn decode_all<E: LifecycleEntity>(docs: Vec<turnstile::Document>) -> Vec<E> {
    let mut entities = Vec::with_capacity(docs.len());
    for doc in docs {
        match doc.decode::<E>() {
            Ok(entity) => entities.push(entity),
            Err(e) => warn!(kind = E::KIND, id = %doc.meta.id, error = %e, "Skipping undecodable document"),
        }
    }
    entities
}
