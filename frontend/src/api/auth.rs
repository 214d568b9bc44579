use shopper_shared::protocol::{CurrentUserRequest, LogoutRequest};
use shopper_shared::{LoginRequest, RefreshRequest, SignupRequest, TokenResponse, User};

use super::ApiClient;
use crate::error::ApiResult;
use crate::web::{HttpClient, KeyValueStore};

impl<C: HttpClient, S: KeyValueStore> ApiClient<C, S> {
    /// 邮箱密码登录，成功后由调用方写入会话
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<TokenResponse> {
        self.send(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn signup(&self, req: SignupRequest) -> ApiResult<User> {
        self.send(&req).await
    }

    /// 令牌对应的当前用户
    pub async fn get_current_user(&self) -> ApiResult<User> {
        self.send(&CurrentUserRequest).await
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> ApiResult<TokenResponse> {
        self.send(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })
        .await
    }

    /// 使服务端的刷新令牌失效（本地会话由 `SessionStore::logout` 清除）
    pub async fn logout(&self) -> ApiResult<()> {
        self.send(&LogoutRequest).await
    }
}
