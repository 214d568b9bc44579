use shopper_shared::protocol::{CancelOrderRequest, GetOrderRequest, MyOrdersRequest};
use shopper_shared::{CreateOrderRequest, Order, PageResponse, Payment, PaymentApprovalRequest};

use super::ApiClient;
use crate::error::ApiResult;
use crate::web::{HttpClient, KeyValueStore};

impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    pub async fn create_order(&self, req: CreateOrderRequest) -> ApiResult<Order> {
        self.send(&req).await
    }

    pub async fn get_my_orders(&self, page: Option<u32>, size: Option<u32>) -> ApiResult<PageResponse<Order>> {
        self.send(&MyOrdersRequest { page, size }).await
    }

    pub async fn get_order(&self, order_id: i64) -> ApiResult<Order> {
        self.send(&GetOrderRequest { order_id }).await
    }

    pub async fn cancel_order(&self, order_id: i64) -> ApiResult<Order> {
        self.send(&CancelOrderRequest { order_id }).await
    }

    /// 支付网关回跳后确认支付
    pub async fn confirm_payment(&self, req: PaymentApprovalRequest) -> ApiResult<Payment> {
        self.send(&req).await
    }
}
