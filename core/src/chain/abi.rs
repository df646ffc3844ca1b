// bazaar/src/chain/abi.rs

//! Contract interfaces consumed by the client. Only the methods the
//! marketplace front-end calls are declared.

use alloy_sol_types::sol;

sol! {
  struct OrderEntry {
    string encrypted_message;
    uint256 product_id;
  }

  interface IMarketplace {
    function getProductsLength() external view returns (uint256);

    function readProduct(uint256 _index) external view returns (
      address,
      string memory,
      string memory,
      string memory,
      string memory,
      uint256,
      uint256
    );

    function writeProduct(
      string memory _name,
      string memory _image,
      string memory _description,
      uint256 _price,
      uint256 _stock
    ) external;

    function buyProduct(uint256 _index, string memory _encryptedMessage) external payable;

    function setVendorsPublicPGP(string memory _pgp) external;

    function readOrders() external view returns (OrderEntry[] memory);

    function refundOrder(uint256 _index) external;
  }

  interface IERC20Token {
    function approve(address spender, uint256 amount) external returns (bool);

    function balanceOf(address owner) external view returns (uint256);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloy_primitives::U256;
  use alloy_sol_types::SolCall;

  #[test]
  fn selectors_match_solidity_signatures() {
    assert_eq!(IMarketplace::getProductsLengthCall::SIGNATURE, "getProductsLength()");
    assert_eq!(IMarketplace::buyProductCall::SIGNATURE, "buyProduct(uint256,string)");
    assert_eq!(IERC20Token::approveCall::SIGNATURE, "approve(address,uint256)");
    // keccak("approve(address,uint256)")[..4]
    assert_eq!(IERC20Token::approveCall::SELECTOR, [0x09, 0x5e, 0xa7, 0xb3]);
    assert_eq!(IERC20Token::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
  }

  #[test]
  fn encodes_buy_call_with_selector_prefix() {
    let call = IMarketplace::buyProductCall {
      _index: U256::from(2u64),
      _encryptedMessage: "hello".to_string(),
    };
    let data = call.abi_encode();
    assert_eq!(&data[..4], &IMarketplace::buyProductCall::SELECTOR);
    // selector + index word + offset word + length word + one padded data word
    assert_eq!(data.len(), 4 + 32 * 4);
  }

  #[test]
  fn decodes_orders_return() {
    let orders = vec![OrderEntry {
      encrypted_message: "secret".to_string(),
      product_id: U256::from(7u64),
    }];
    let encoded = IMarketplace::readOrdersCall::abi_encode_returns(&(orders,));
    let decoded = IMarketplace::readOrdersCall::abi_decode_returns(&encoded, true).unwrap();
    assert_eq!(decoded._0.len(), 1);
    assert_eq!(decoded._0[0].encrypted_message, "secret");
    assert_eq!(decoded._0[0].product_id, U256::from(7u64));
  }
}
