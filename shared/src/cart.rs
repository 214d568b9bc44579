use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::Payload;
use crate::product::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub product: Product,
    pub quantity: u32,
    pub created_at: NaiveDateTime,
}

/// 服务端购物车（权威数据，徽标计数只是它的显示副本）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total_price: i64,
    pub total_count: u32,
}

impl Payload for CartResponse {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i64,
    pub quantity: u32,
}

/// 修改购物车条目数量的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemQuantity {
    pub quantity: u32,
}
