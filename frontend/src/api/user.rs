use shopper_shared::protocol::{DeleteAddressRequest, ListAddressesRequest, MyProfileRequest};
use shopper_shared::{Address, AddressRequest, PasswordChangeRequest, ProfileUpdateRequest, User};

use super::ApiClient;
use crate::error::ApiResult;
use crate::web::{HttpClient, KeyValueStore};

impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    pub async fn get_my_profile(&self) -> ApiResult<User> {
        self.send(&MyProfileRequest).await
    }

    pub async fn update_my_profile(&self, name: &str) -> ApiResult<User> {
        self.send(&ProfileUpdateRequest {
            name: name.to_string(),
        })
        .await
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> ApiResult<()> {
        self.send(&PasswordChangeRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        })
        .await
    }

    // =========================================================
    // 收货地址 (Addresses)
    // =========================================================

    pub async fn get_addresses(&self) -> ApiResult<Vec<Address>> {
        self.send(&ListAddressesRequest).await
    }

    pub async fn add_address(&self, req: AddressRequest) -> ApiResult<Address> {
        self.send(&req).await
    }

    pub async fn delete_address(&self, address_id: i64) -> ApiResult<()> {
        self.send(&DeleteAddressRequest { address_id }).await
    }
}
