use shopper_shared::protocol::{
    CategoryProductsRequest, DeleteProductRequest, GetProductRequest, ListCategoriesRequest,
    SearchProductsRequest, UpdateProductRequest,
};
use shopper_shared::{Category, PageResponse, Product, ProductForm, ProductListParams};

use super::ApiClient;
use crate::error::ApiResult;
use crate::web::{HttpClient, KeyValueStore};

impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    /// 商品列表；设置了 `category_id` 时改为查询该分类下的商品
    pub async fn get_products(&self, params: &ProductListParams) -> ApiResult<PageResponse<Product>> {
        self.send(params).await
    }

    pub async fn get_product(&self, product_id: i64) -> ApiResult<Product> {
        self.send(&GetProductRequest { product_id }).await
    }

    pub async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        self.send(&ListCategoriesRequest).await
    }

    pub async fn get_products_by_category(
        &self,
        category_id: i64,
        params: ProductListParams,
    ) -> ApiResult<PageResponse<Product>> {
        self.send(&CategoryProductsRequest { category_id, params }).await
    }

    pub async fn search_products(
        &self,
        keyword: &str,
        params: ProductListParams,
    ) -> ApiResult<PageResponse<Product>> {
        self.send(&SearchProductsRequest {
            keyword: keyword.to_string(),
            params,
        })
        .await
    }

    // =========================================================
    // 管理端 (Admin)
    // =========================================================

    pub async fn create_product(&self, form: ProductForm) -> ApiResult<Product> {
        self.send(&form).await
    }

    pub async fn update_product(&self, product_id: i64, form: ProductForm) -> ApiResult<Product> {
        self.send(&UpdateProductRequest { product_id, form }).await
    }

    pub async fn delete_product(&self, product_id: i64) -> ApiResult<()> {
        self.send(&DeleteProductRequest { product_id }).await
    }
}
