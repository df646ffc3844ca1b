// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use alloy_primitives::{address, Address, B256, U256};
use async_trait::async_trait;
use bazaar::chain::{ChainError, ChainResult, Marketplace, Token, TxReceipt, Wallet};
use bazaar::flow::{FlowControl, FlowError, Handler, Shared};
use bazaar::{Deployment, Market, NewProduct, Order, Product, Session};
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

pub const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");
pub const SELLER: Address = address!("00000000000000000000000000000000000000bb");
pub const MARKETPLACE: Address = address!("0000000000000000000000000000000000000c01");
pub const TOKEN: Address = address!("0000000000000000000000000000000000000c02");

pub fn deployment() -> Deployment {
  Deployment {
    marketplace: MARKETPLACE,
    token: TOKEN,
  }
}

pub fn product(index: u64, name: &str, price: u64, stock: u64) -> Product {
  Product {
    index,
    owner: SELLER,
    name: name.to_string(),
    image: format!("https://img.example/{index}.png"),
    description: format!("{name} description"),
    pgp: None,
    price: U256::from(price),
    stock,
  }
}

pub fn order(index: u64, message: &str, product_id: u64) -> Order {
  Order {
    index,
    encrypted_message: message.to_string(),
    product_id,
  }
}

// --- In-memory chain shared by the mock wallet and contract bindings ---

#[derive(Default)]
pub struct MockChain {
  pub products: Mutex<Vec<Product>>,
  pub orders: Mutex<Vec<Order>>,
  pub balance: Mutex<U256>,
  /// Every call in order, e.g. `"approve:42"`, `"buyProduct:0"`.
  pub calls: Mutex<Vec<String>>,
  pub written: Mutex<Vec<NewProduct>>,
  pub sent_messages: Mutex<Vec<String>>,
  pub pgp_keys: Mutex<Vec<String>>,

  pub products_length_calls: AtomicUsize,
  pub read_product_calls: AtomicUsize,
  pub read_orders_calls: AtomicUsize,
  pub balance_calls: AtomicUsize,
  pub approve_calls: AtomicUsize,
  pub send_calls: AtomicUsize,
  tx_counter: AtomicUsize,

  pub fail_approve: AtomicBool,
  pub revert_send: AtomicBool,
  pub fail_balance: AtomicBool,
  pub fail_read_product_at: Mutex<Option<u64>>,
}

#[derive(Debug, Clone, Copy)]
pub struct RefreshReads {
  pub products: usize,
  pub orders: usize,
  pub balance: usize,
}

impl MockChain {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn with_products(self: Arc<Self>, products: Vec<Product>) -> Arc<Self> {
    *self.products.lock() = products;
    self
  }

  pub fn with_orders(self: Arc<Self>, orders: Vec<Order>) -> Arc<Self> {
    *self.orders.lock() = orders;
    self
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  /// Number of full refreshes seen so far (one balance read per refresh).
  pub fn refreshes(&self) -> usize {
    self.balance_calls.load(Ordering::SeqCst)
  }

  /// Per-part read counters; one full refresh bumps each by one.
  pub fn refresh_reads(&self) -> RefreshReads {
    RefreshReads {
      products: self.products_length_calls.load(Ordering::SeqCst),
      orders: self.read_orders_calls.load(Ordering::SeqCst),
      balance: self.balance_calls.load(Ordering::SeqCst),
    }
  }

  fn record(&self, call: String) {
    self.calls.lock().push(call);
  }

  fn receipt(&self) -> TxReceipt {
    let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) as u8 + 1;
    TxReceipt {
      tx_hash: B256::with_last_byte(n),
      block_number: Some(n as u64),
    }
  }

  fn send(&self, call: String) -> ChainResult<TxReceipt> {
    self.send_calls.fetch_add(1, Ordering::SeqCst);
    self.record(call);
    let receipt = self.receipt();
    if self.revert_send.load(Ordering::SeqCst) {
      return Err(ChainError::Reverted {
        tx_hash: receipt.tx_hash,
      });
    }
    Ok(receipt)
  }
}

pub struct MockMarketplace {
  chain: Arc<MockChain>,
  address: Address,
}

#[async_trait]
impl Marketplace for MockMarketplace {
  fn address(&self) -> Address {
    self.address
  }

  async fn products_length(&self) -> ChainResult<u64> {
    self.chain.products_length_calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.chain.products.lock().len() as u64)
  }

  async fn read_product(&self, index: u64) -> ChainResult<Product> {
    self.chain.read_product_calls.fetch_add(1, Ordering::SeqCst);
    if *self.chain.fail_read_product_at.lock() == Some(index) {
      return Err(ChainError::Transport(format!("readProduct({index}) timed out")));
    }
    self
      .chain
      .products
      .lock()
      .get(index as usize)
      .cloned()
      .ok_or_else(|| ChainError::Rpc {
        code: 3,
        message: "execution reverted".into(),
      })
  }

  async fn read_orders(&self, _account: Address) -> ChainResult<Vec<Order>> {
    self.chain.read_orders_calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.chain.orders.lock().clone())
  }

  async fn write_product(&self, _from: Address, product: &NewProduct) -> ChainResult<TxReceipt> {
    self.chain.written.lock().push(product.clone());
    self.chain.send(format!("writeProduct:{}", product.name))
  }

  async fn buy_product(&self, _from: Address, index: u64, encrypted_message: &str) -> ChainResult<TxReceipt> {
    self.chain.sent_messages.lock().push(encrypted_message.to_string());
    self.chain.send(format!("buyProduct:{index}"))
  }

  async fn set_vendor_pgp(&self, _from: Address, key: &str) -> ChainResult<TxReceipt> {
    self.chain.pgp_keys.lock().push(key.to_string());
    self.chain.send("setVendorsPublicPGP".to_string())
  }

  async fn refund_order(&self, _from: Address, index: u64) -> ChainResult<TxReceipt> {
    self.chain.send(format!("refundOrder:{index}"))
  }
}

pub struct MockToken {
  chain: Arc<MockChain>,
  address: Address,
}

#[async_trait]
impl Token for MockToken {
  fn address(&self) -> Address {
    self.address
  }

  async fn approve(&self, _from: Address, spender: Address, amount: U256) -> ChainResult<TxReceipt> {
    self.chain.approve_calls.fetch_add(1, Ordering::SeqCst);
    assert_eq!(spender, MARKETPLACE, "approval must name the marketplace as spender");
    self.chain.record(format!("approve:{amount}"));
    if self.chain.fail_approve.load(Ordering::SeqCst) {
      return Err(ChainError::Rpc {
        code: 4001,
        message: "User denied transaction signature".into(),
      });
    }
    Ok(self.chain.receipt())
  }

  async fn balance_of(&self, _owner: Address) -> ChainResult<U256> {
    self.chain.balance_calls.fetch_add(1, Ordering::SeqCst);
    if self.chain.fail_balance.load(Ordering::SeqCst) {
      return Err(ChainError::Transport("connection reset".into()));
    }
    Ok(*self.chain.balance.lock())
  }
}

pub struct MockWallet {
  pub chain: Arc<MockChain>,
  pub accounts: Vec<Address>,
  pub refuse: bool,
  pub enable_calls: AtomicUsize,
}

impl MockWallet {
  pub fn new(chain: Arc<MockChain>) -> Self {
    Self {
      chain,
      accounts: vec![ACCOUNT],
      refuse: false,
      enable_calls: AtomicUsize::new(0),
    }
  }
}

#[async_trait]
impl Wallet for MockWallet {
  async fn enable(&self) -> ChainResult<Vec<Address>> {
    self.enable_calls.fetch_add(1, Ordering::SeqCst);
    if self.refuse {
      return Err(ChainError::Rpc {
        code: 4001,
        message: "User rejected the request.".into(),
      });
    }
    Ok(self.accounts.clone())
  }

  fn bind_marketplace(&self, address: Address) -> Arc<dyn Marketplace> {
    Arc::new(MockMarketplace {
      chain: self.chain.clone(),
      address,
    })
  }

  fn bind_token(&self, address: Address) -> Arc<dyn Token> {
    Arc::new(MockToken {
      chain: self.chain.clone(),
      address,
    })
  }
}

/// A market with a connected session over `chain`.
pub async fn connected_market(chain: Arc<MockChain>) -> Market {
  let wallet: Arc<dyn Wallet> = Arc::new(MockWallet::new(chain));
  let session = Session::connect(Some(wallet), deployment())
    .await
    .expect("mock wallet connects");
  let market = Market::default();
  market.set_session(session);
  market
}

// --- Flow engine fixtures ---

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
  pub skip_middle: bool,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow framework error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(fe.to_string())
  }
}

pub fn create_simple_handler(step_name: &'static str, message_to_append: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: Shared<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      tracing::debug!(target: "test_handlers", step = step_name, counter = guard.counter, "executed");
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(FlowControl::Stop);
      }
      Ok(FlowControl::Continue)
    })
  })
}

pub fn create_failing_handler(step_name: &'static str, error_message: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: Shared<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

// --- Helper for Tracing Setup ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
