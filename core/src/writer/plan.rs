// bazaar/src/writer/plan.rs

//! Turns a raw `WriteRequest` into a `Plan`. Everything here runs before the
//! chain is touched; bad input ends as `MarketError::Validation`.

use super::operation::{Plan, PreparedCall, ProductDraft, WriteRequest};
use crate::error::{MarketError, MarketResult};
use crate::model::{parse_amount, NewProduct};
use crate::state::Market;

/// Message sent with a purchase when the buyer leaves the field empty.
pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "No message provided";

pub fn plan(market: &Market, request: WriteRequest) -> MarketResult<Plan> {
  match request {
    WriteRequest::CreateProduct(draft) => plan_create(market, draft),
    WriteRequest::BuyProduct {
      index,
      encrypted_message,
    } => {
      let product = market.product(index).ok_or(MarketError::UnknownProduct(index))?;
      let message = if encrypted_message.trim().is_empty() {
        EMPTY_MESSAGE_PLACEHOLDER.to_string()
      } else {
        encrypted_message
      };
      Ok(Plan {
        call: PreparedCall::BuyProduct {
          index,
          encrypted_message: message,
        },
        payment: Some(product.price),
        progress: "Waiting for payment approval...".to_string(),
        awaiting: Some(format!("Awaiting payment for \"{}\"...", product.name)),
        success: format!("You successfully bought \"{}\".", product.name),
      })
    }
    WriteRequest::SetPgpKey { key } => {
      if key.trim().is_empty() {
        return Err(MarketError::Validation("PGP public key must not be empty".into()));
      }
      Ok(Plan {
        call: PreparedCall::SetVendorPgp { key },
        payment: None,
        progress: "Awaiting change of your PGP public key...".to_string(),
        awaiting: None,
        success: "You successfully changed your PGP public key.".to_string(),
      })
    }
    WriteRequest::RefundOrder { index } => {
      let order = market.order(index).ok_or(MarketError::UnknownOrder(index))?;
      // the refund pays back what the referenced product costs
      let product = market
        .product(order.product_id)
        .ok_or(MarketError::UnknownProduct(order.product_id))?;
      Ok(Plan {
        call: PreparedCall::RefundOrder { index },
        payment: Some(product.price),
        progress: "Waiting for refund approval...".to_string(),
        awaiting: Some(format!("Refunding order for \"{}\"...", product.name)),
        success: format!("You successfully refunded the order for \"{}\".", product.name),
      })
    }
  }
}

fn plan_create(market: &Market, draft: ProductDraft) -> MarketResult<Plan> {
  let name = draft.name.trim().to_string();
  if name.is_empty() {
    return Err(MarketError::Validation("product name must not be empty".into()));
  }
  let price = parse_amount(draft.price.trim(), market.decimals())
    .map_err(|e| MarketError::Validation(format!("price '{}': {e}", draft.price.trim())))?;
  let stock = draft
    .stock
    .trim()
    .parse::<u64>()
    .map_err(|_| MarketError::Validation(format!("stock '{}' is not a whole number", draft.stock.trim())))?;

  Ok(Plan {
    progress: format!("Adding \"{name}\"..."),
    awaiting: None,
    success: format!("You successfully added \"{name}\"."),
    payment: None,
    call: PreparedCall::WriteProduct(NewProduct {
      name,
      image: draft.image.trim().to_string(),
      description: draft.description.trim().to_string(),
      price,
      stock,
    }),
  })
}
