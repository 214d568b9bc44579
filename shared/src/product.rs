use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::Payload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Payload for Category {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: i64,
    pub image_url: String,
    pub display_order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub stock_quantity: i32,
    pub category: Category,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// 按 `display_order` 排在最前的图片
    pub fn thumbnail(&self) -> Option<&ProductImage> {
        self.images.iter().min_by_key(|img| img.display_order)
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

impl Payload for Product {}

/// 商品列表查询参数
///
/// 未设置的字段不会出现在查询串中，由服务端使用默认值。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub category_id: Option<i64>,
    pub keyword: Option<String>,
    pub sort: Option<String>,
}

impl ProductListParams {
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            ..Default::default()
        }
    }

    /// 转换为查询串参数（`category_id` 由调用方决定放在路径中）
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size", size.to_string()));
        }
        if let Some(keyword) = &self.keyword {
            query.push(("keyword", keyword.clone()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort", sort.clone()));
        }
        query
    }
}

/// 管理端商品表单（图片上传走单独的接口，不在此处）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock_quantity: i32,
    pub category_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_skips_unset_fields() {
        let params = ProductListParams {
            size: Some(20),
            sort: Some("price,asc".into()),
            category_id: Some(9),
            ..Default::default()
        };
        assert_eq!(
            params.to_query(),
            vec![("size", "20".to_string()), ("sort", "price,asc".to_string())]
        );
    }

    #[test]
    fn thumbnail_picks_lowest_display_order() {
        let category = Category {
            id: 1,
            name: "Shoes".into(),
            description: None,
        };
        let ts = NaiveDateTime::default();
        let product = Product {
            id: 1,
            name: "Runner".into(),
            description: String::new(),
            price: 59000,
            stock_quantity: 0,
            category,
            images: vec![
                ProductImage { id: 10, image_url: "b.png".into(), display_order: 2 },
                ProductImage { id: 11, image_url: "a.png".into(), display_order: 1 },
            ],
            created_at: ts,
            updated_at: ts,
        };

        assert_eq!(product.thumbnail().map(|i| i.id), Some(11));
        assert!(!product.in_stock());
    }
}
