use shopper_shared::protocol::{
    ClearCartRequest, DeleteCartItemRequest, GetCartRequest, UpdateCartItemRequest,
};
use shopper_shared::{AddToCartRequest, CartItemQuantity, CartResponse};

use super::ApiClient;
use crate::error::ApiResult;
use crate::web::{HttpClient, KeyValueStore};

// 这些方法不改动徽标计数，由页面根据返回的购物车自行同步
impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    pub async fn get_cart(&self) -> ApiResult<CartResponse> {
        self.send(&GetCartRequest).await
    }

    pub async fn add_to_cart(&self, product_id: i64, quantity: u32) -> ApiResult<CartResponse> {
        self.send(&AddToCartRequest {
            product_id,
            quantity,
        })
        .await
    }

    pub async fn update_cart_item(&self, cart_item_id: i64, quantity: u32) -> ApiResult<CartResponse> {
        self.send(&UpdateCartItemRequest {
            cart_item_id,
            body: CartItemQuantity { quantity },
        })
        .await
    }

    pub async fn delete_cart_item(&self, cart_item_id: i64) -> ApiResult<()> {
        self.send(&DeleteCartItemRequest { cart_item_id }).await
    }

    pub async fn clear_cart(&self) -> ApiResult<()> {
        self.send(&ClearCartRequest).await
    }
}
