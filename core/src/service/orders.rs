// storefront/src/service/orders.rs

//! Order placement and order status advancement.

use std::sync::Arc;
use tracing::{debug, debug_span, error, info, instrument, warn, Instrument};

use crate::error::{EntityKind, StorefrontError, StorefrontResult};
use crate::models::{NewOrder, Order, OrderId, OrderRequest, OrderStatus, ProductId};
use crate::store::{OrderTransaction, Store};
use crate::validation;

/// Status only moves forward through three states, so a caller can lose the
/// compare-and-set race at most twice before it observes the terminal state.
const MAX_STATUS_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct OrderService {
  store: Arc<dyn Store>,
}

impl OrderService {
  pub fn new(store: Arc<dyn Store>) -> Self {
    Self { store }
  }

  /// Validates the submission, then reserves stock and records the order in one
  /// transaction. Returns the new order's id.
  ///
  /// # Errors
  /// * `Validation` naming the offending field.
  /// * `NotFound` if the product does not exist.
  /// * `InsufficientStock` if fewer than `qty` units are available.
  /// * `Store` if the backend failed; nothing was written and the call may be retried.
  #[instrument(
    name = "order_service::place_order",
    skip(self, request),
    fields(qty = ?request.qty),
    err(Display)
  )]
  pub async fn place_order(&self, product_id: ProductId, request: &OrderRequest) -> StorefrontResult<OrderId> {
    let new_order = validation::validate_order_request(product_id, request).map_err(|e| {
      warn!(error = %e, "Order submission rejected by validation.");
      e
    })?;
    self.place_validated(&new_order).await
  }

  /// Runs the order transaction for an already validated order.
  pub async fn place_validated(&self, order: &NewOrder) -> StorefrontResult<OrderId> {
    let mut tx = self.store.begin_order().await?;

    match reserve_and_record(tx.as_mut(), order).await {
      Ok(order_id) => {
        tx.commit().await.map_err(|e| {
          error!(error = %e, product_id = order.product_id, "Order transaction failed to commit.");
          e
        })?;
        info!(
          order_id,
          product_id = order.product_id,
          qty = order.qty,
          "Order placed and stock reserved."
        );
        Ok(order_id)
      }
      Err(err) => {
        if let Err(rollback_err) = tx.rollback().await {
          // The backend discards the transaction on its own; the original error is what the caller needs.
          error!(error = %rollback_err, "Rollback of order transaction failed.");
        }
        match &err {
          StorefrontError::Store { .. } => error!(error = %err, "Order transaction aborted."),
          _ => warn!(error = %err, "Order rejected."),
        }
        Err(err)
      }
    }
  }

  /// Moves an order one step along `Pending -> Paid -> Delivered`.
  /// On a `Delivered` order this is a no-op that returns `Delivered`.
  #[instrument(name = "order_service::advance_status", skip(self), err(Display))]
  pub async fn advance_status(&self, order_id: OrderId) -> StorefrontResult<OrderStatus> {
    for _ in 0..MAX_STATUS_ATTEMPTS {
      let current = self
        .store
        .get_order(order_id)
        .await?
        .ok_or_else(|| StorefrontError::not_found(EntityKind::Order, order_id))?
        .status;

      let next = current.advance();
      if next == current {
        debug!(status = %current, "Order already in terminal status.");
        return Ok(current);
      }

      if self.store.compare_and_set_status(order_id, current, next).await? {
        info!(from = %current, to = %next, "Order status advanced.");
        return Ok(next);
      }
      debug!(from = %current, "Order status changed concurrently; re-reading.");
    }

    Err(StorefrontError::store(anyhow::anyhow!(
      "status of order {} kept changing while advancing it",
      order_id
    )))
  }

  #[instrument(name = "order_service::list_orders", skip(self))]
  pub async fn list_orders(&self) -> StorefrontResult<Vec<Order>> {
    self.store.list_orders().await
  }

  pub async fn get_order(&self, order_id: OrderId) -> StorefrontResult<Order> {
    self
      .store
      .get_order(order_id)
      .await?
      .ok_or_else(|| StorefrontError::not_found(EntityKind::Order, order_id))
  }
}

/// The steps run, in order, while the product row is locked. The first failing
/// step ends the run and the caller rolls the transaction back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStep {
  LockStock,
  CheckStock,
  InsertOrder,
  DecrementStock,
}

impl PlacementStep {
  pub const ALL: [PlacementStep; 4] = [
    PlacementStep::LockStock,
    PlacementStep::CheckStock,
    PlacementStep::InsertOrder,
    PlacementStep::DecrementStock,
  ];

  pub fn name(self) -> &'static str {
    match self {
      PlacementStep::LockStock => "lock_stock",
      PlacementStep::CheckStock => "check_stock",
      PlacementStep::InsertOrder => "insert_order",
      PlacementStep::DecrementStock => "decrement_stock",
    }
  }
}

/// State threaded through the placement steps. Each step reads what it needs,
/// awaits the store, then writes its result back.
struct PlacementContext<'a> {
  order: &'a NewOrder,
  available: Option<i32>,
  order_id: Option<OrderId>,
}

async fn run_step(
  step: PlacementStep,
  tx: &mut dyn OrderTransaction,
  ctx: &mut PlacementContext<'_>,
) -> StorefrontResult<()> {
  let order = ctx.order;
  match step {
    PlacementStep::LockStock => {
      let available = tx
        .lock_product_stock(order.product_id)
        .await?
        .ok_or_else(|| StorefrontError::not_found(EntityKind::Product, order.product_id))?;
      ctx.available = Some(available);
    }
    PlacementStep::CheckStock => {
      let available = ctx.available.unwrap_or(0);
      if available < order.qty {
        return Err(StorefrontError::InsufficientStock {
          requested: order.qty,
          available,
        });
      }
    }
    PlacementStep::InsertOrder => {
      ctx.order_id = Some(tx.insert_order(order).await?);
    }
    PlacementStep::DecrementStock => {
      tx.decrement_stock(order.product_id, order.qty).await?;
    }
  }
  Ok(())
}

async fn reserve_and_record(tx: &mut dyn OrderTransaction, order: &NewOrder) -> StorefrontResult<OrderId> {
  let mut ctx = PlacementContext {
    order,
    available: None,
    order_id: None,
  };

  for (step_index, step) in PlacementStep::ALL.into_iter().enumerate() {
    let span = debug_span!("placement_step", step_name = step.name(), step_index);
    run_step(step, tx, &mut ctx).instrument(span).await.map_err(|e| {
      debug!(step_name = step.name(), error = %e, "Placement step failed.");
      e
    })?;
  }

  ctx
    .order_id
    .ok_or_else(|| StorefrontError::store(anyhow::anyhow!("order placement finished without an order id")))
}
