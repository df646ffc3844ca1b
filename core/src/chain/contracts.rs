// bazaar/src/chain/contracts.rs

//! JSON-RPC backed bindings of the marketplace and token contracts.

use super::abi::{IERC20Token, IMarketplace};
use super::rpc::JsonRpcClient;
use super::{ChainError, ChainResult, Marketplace, Token, TxReceipt};
use crate::model::{NewProduct, Order, Product};
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

fn decode<C: SolCall>(what: &'static str, data: &[u8]) -> ChainResult<C::Return> {
  C::abi_decode_returns(data, true).map_err(|e| ChainError::Decode {
    what,
    detail: e.to_string(),
  })
}

fn to_u64(what: &'static str, value: U256) -> ChainResult<u64> {
  u64::try_from(value).map_err(|_| ChainError::Decode {
    what,
    detail: format!("{value} does not fit in u64"),
  })
}

pub struct MarketplaceContract {
  client: Arc<JsonRpcClient>,
  address: Address,
}

impl MarketplaceContract {
  pub fn new(client: Arc<JsonRpcClient>, address: Address) -> Self {
    Self { client, address }
  }

  async fn call<C: SolCall>(&self, what: &'static str, from: Option<Address>, call: C) -> ChainResult<C::Return> {
    let out = self.client.call(from, self.address, call.abi_encode()).await?;
    decode::<C>(what, &out)
  }

  async fn send<C: SolCall>(&self, from: Address, call: C) -> ChainResult<TxReceipt> {
    self.client.send_transaction(from, self.address, call.abi_encode()).await
  }
}

#[async_trait]
impl Marketplace for MarketplaceContract {
  fn address(&self) -> Address {
    self.address
  }

  async fn products_length(&self) -> ChainResult<u64> {
    let ret = self
      .call("getProductsLength", None, IMarketplace::getProductsLengthCall {})
      .await?;
    to_u64("getProductsLength", ret._0)
  }

  #[instrument(skip(self))]
  async fn read_product(&self, index: u64) -> ChainResult<Product> {
    let p = self
      .call(
        "readProduct",
        None,
        IMarketplace::readProductCall {
          _index: U256::from(index),
        },
      )
      .await?;
    Ok(Product {
      index,
      owner: p._0,
      name: p._1,
      image: p._2,
      description: p._3,
      pgp: Some(p._4).filter(|key| !key.trim().is_empty()),
      price: p._5,
      stock: to_u64("readProduct.stock", p._6)?,
    })
  }

  async fn read_orders(&self, account: Address) -> ChainResult<Vec<Order>> {
    let ret = self
      .call("readOrders", Some(account), IMarketplace::readOrdersCall {})
      .await?;
    ret
      ._0
      .into_iter()
      .enumerate()
      .map(|(position, entry)| {
        Ok(Order {
          index: position as u64,
          encrypted_message: entry.encrypted_message,
          product_id: to_u64("readOrders.product_id", entry.product_id)?,
        })
      })
      .collect()
  }

  async fn write_product(&self, from: Address, product: &NewProduct) -> ChainResult<TxReceipt> {
    self
      .send(
        from,
        IMarketplace::writeProductCall {
          _name: product.name.clone(),
          _image: product.image.clone(),
          _description: product.description.clone(),
          _price: product.price,
          _stock: U256::from(product.stock),
        },
      )
      .await
  }

  async fn buy_product(&self, from: Address, index: u64, encrypted_message: &str) -> ChainResult<TxReceipt> {
    self
      .send(
        from,
        IMarketplace::buyProductCall {
          _index: U256::from(index),
          _encryptedMessage: encrypted_message.to_string(),
        },
      )
      .await
  }

  async fn set_vendor_pgp(&self, from: Address, key: &str) -> ChainResult<TxReceipt> {
    self
      .send(from, IMarketplace::setVendorsPublicPGPCall { _pgp: key.to_string() })
      .await
  }

  async fn refund_order(&self, from: Address, index: u64) -> ChainResult<TxReceipt> {
    self
      .send(
        from,
        IMarketplace::refundOrderCall {
          _index: U256::from(index),
        },
      )
      .await
  }
}

pub struct TokenContract {
  client: Arc<JsonRpcClient>,
  address: Address,
}

impl TokenContract {
  pub fn new(client: Arc<JsonRpcClient>, address: Address) -> Self {
    Self { client, address }
  }
}

#[async_trait]
impl Token for TokenContract {
  fn address(&self) -> Address {
    self.address
  }

  #[instrument(skip(self), fields(token = %self.address))]
  async fn approve(&self, from: Address, spender: Address, amount: U256) -> ChainResult<TxReceipt> {
    let call = IERC20Token::approveCall { spender, amount };
    self.client.send_transaction(from, self.address, call.abi_encode()).await
  }

  async fn balance_of(&self, owner: Address) -> ChainResult<U256> {
    let call = IERC20Token::balanceOfCall { owner };
    let out = self.client.call(None, self.address, call.abi_encode()).await?;
    Ok(decode::<IERC20Token::balanceOfCall>("balanceOf", &out)?._0)
  }
}
