use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::Payload;
use crate::product::Product;
use crate::user::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 待支付
    Pending,
    Paid,
    /// 备货中
    Preparing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// 仍可由用户取消的状态
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Paid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub product: Product,
    pub quantity: u32,
    /// 下单时的单价
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub items: Vec<OrderItem>,
    pub address: Address,
    pub total_price: i64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Payload for Order {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub address_id: i64,
    pub items: Vec<OrderLine>,
}

// =========================================================
// 支付 (Payment)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    VirtualAccount,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_key: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Payload for Payment {}

/// 支付网关回跳后的确认请求，三个值都来自回跳 URL 的查询串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentApprovalRequest {
    pub order_id: String,
    pub payment_key: String,
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_order_body_shape() {
        let req = CreateOrderRequest {
            address_id: 3,
            items: vec![OrderLine { product_id: 7, quantity: 2 }],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "addressId": 3, "items": [{ "productId": 7, "quantity": 2 }] })
        );
    }

    #[test]
    fn status_names_match_server() {
        let status: OrderStatus = serde_json::from_value(json!("PREPARING")).unwrap();
        assert_eq!(status, OrderStatus::Preparing);
        assert!(!status.is_cancellable());
        assert_eq!(
            serde_json::to_value(PaymentMethod::VirtualAccount).unwrap(),
            json!("VIRTUAL_ACCOUNT")
        );
    }
}
