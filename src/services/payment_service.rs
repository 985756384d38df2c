use std::sync::Arc;
use crate::entities::{payment_entity as payments, OrderStatus, PaymentMethod};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::OrderService;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};

/// The tendered amount must cover the order total; equal is enough.
fn amount_covers_total(amount: Decimal, total: Decimal) -> AppResult<()> {
    if amount < total {
        return Err(AppError::ValidationError(
            "Payment amount is insufficient".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct PaymentService {
    pool: Arc<DatabaseConnection>,
    order_service: OrderService,
    restaurant_name: String,
}

impl PaymentService {
    pub fn new(pool: Arc<DatabaseConnection>, order_service: OrderService, restaurant_name: String) -> Self {
        Self {
            pool,
            order_service,
            restaurant_name,
        }
    }

    /// Billing view data; totals are recomputed first so the amounts shown
    /// are never stale.
    pub async fn get_billing(&self, order_id: i64) -> AppResult<BillingResponse> {
        self.order_service.refresh_totals(order_id).await?;
        let detail = self.order_service.get_order_detail(order_id).await?;
        Ok(BillingResponse {
            order: detail.order,
            items: detail.items,
        })
    }

    /// Settles an order: recomputes totals, checks the tendered amount
    /// covers them, writes the one payment record, marks the order paid and
    /// frees its table. A shortfall or an already-paid order mutates nothing.
    pub async fn process_payment(
        &self,
        order_id: i64,
        processed_by: i64,
        request: ProcessPaymentRequest,
    ) -> AppResult<PaymentResponse> {
        let method: PaymentMethod = request.payment_method.parse().map_err(|_| {
            AppError::ValidationError(format!(
                "Unknown payment method: {}",
                request.payment_method
            ))
        })?;

        let txn = self.pool.begin().await?;

        let order = self.order_service.find_order(&txn, order_id).await?;
        if order.status == OrderStatus::Cancelled {
            return Err(AppError::ValidationError(
                "Cancelled orders cannot be paid".to_string(),
            ));
        }

        let existing = payments::Entity::find()
            .filter(payments::Column::OrderId.eq(order.id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Order has already been paid".to_string(),
            ));
        }

        // Recompute against the current lines; the cached total may be stale.
        let order_id = order.id;
        let table_id = order.table_id;
        let totals = self
            .order_service
            .recalculate_totals(&txn, order)
            .await?;

        amount_covers_total(request.amount, totals.total)?;

        let payment = payments::ActiveModel {
            order_id: Set(order_id),
            amount: Set(request.amount.round_dp(2)),
            method: Set(method),
            reference_number: Set(request.reference_number),
            processed_by: Set(Some(processed_by)),
            processed_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let order = self.order_service.find_order(&txn, order_id).await?;
        let mut active = order.into_active_model();
        active.status = Set(OrderStatus::Paid);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        if let Some(table_id) = table_id {
            self.order_service.release_table(&txn, table_id).await?;
        }

        txn.commit().await?;
        Ok(PaymentResponse::from(payment))
    }

    pub async fn get_receipt(&self, order_id: i64) -> AppResult<ReceiptResponse> {
        let detail = self.order_service.get_order_detail(order_id).await?;
        let payment = payments::Entity::find()
            .filter(payments::Column::OrderId.eq(order_id))
            .one(&*self.pool)
            .await?;

        Ok(ReceiptResponse {
            restaurant_name: self.restaurant_name.clone(),
            order: detail.order,
            items: detail.items,
            payment: payment.map(PaymentResponse::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exact_amount_is_sufficient() {
        assert!(amount_covers_total(dec!(27.54), dec!(27.54)).is_ok());
    }

    #[test]
    fn test_one_cent_short_is_rejected() {
        let err = amount_covers_total(dec!(27.53), dec!(27.54)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_overpayment_is_accepted() {
        assert!(amount_covers_total(dec!(30.00), dec!(27.54)).is_ok());
    }
}
