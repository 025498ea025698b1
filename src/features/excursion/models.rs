use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 远足记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Excursion {
    /// 服务端生成的唯一标识（UUID v4），创建后不可变
    #[schema(example = "0b4f9a4e-7c2d-4d8a-9e55-0d6f0a8b2c11")]
    pub uuid: String,
    /// 山峰/路线名称
    #[schema(example = "Mount Nowhere")]
    pub name: String,
    /// 海拔高度（米）
    #[schema(example = 2000.0)]
    pub height: f64,
    /// 照片地址
    #[schema(example = "https://picsum.photos/id/15/1024/768.webp")]
    pub photo: String,
    /// 用时（分钟）
    #[schema(example = 180.0)]
    pub timing: f64,
    /// 备注（自由文本）
    pub notes: String,
}

/// 创建/整体替换请求体。
///
/// 不含 uuid：创建时由服务端生成，替换时取路径参数，客户端传入的标识一律忽略。
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
  "name": "Peak X",
  "height": 1500,
  "photo": "https://picsum.photos/id/29/1024/768.webp",
  "timing": 90,
  "notes": "ok"
}))]
pub struct NewExcursion {
    pub name: String,
    pub height: f64,
    pub photo: String,
    pub timing: f64,
    pub notes: String,
}

impl NewExcursion {
    /// 写操作前的业务校验（字段类型已由反序列化保证）。
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name 不能为空".into()));
        }
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(AppError::Validation("height 必须为非负数".into()));
        }
        if !self.timing.is_finite() || self.timing < 0.0 {
            return Err(AppError::Validation("timing 必须为非负数".into()));
        }
        if !(self.photo.starts_with("http://") || self.photo.starts_with("https://")) {
            return Err(AppError::Validation("photo 必须为 http(s) 地址".into()));
        }
        Ok(())
    }

    /// 绑定服务端生成的标识，得到完整记录。
    pub fn into_excursion(self, uuid: String) -> Excursion {
        Excursion {
            uuid,
            name: self.name,
            height: self.height,
            photo: self.photo,
            timing: self.timing,
            notes: self.notes,
        }
    }
}

/// 局部更新请求体：仅合并显式出现的字段，缺省字段保持原值。
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"notes": "gear upgraded, retry next spring"}))]
pub struct ExcursionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExcursionPatch {
    /// 局部更新的业务校验（只校验出现的字段）。
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(AppError::Validation("name 不能为空".into()));
        }
        if let Some(h) = self.height
            && (!h.is_finite() || h < 0.0)
        {
            return Err(AppError::Validation("height 必须为非负数".into()));
        }
        if let Some(t) = self.timing
            && (!t.is_finite() || t < 0.0)
        {
            return Err(AppError::Validation("timing 必须为非负数".into()));
        }
        if let Some(p) = &self.photo
            && !(p.starts_with("http://") || p.starts_with("https://"))
        {
            return Err(AppError::Validation("photo 必须为 http(s) 地址".into()));
        }
        Ok(())
    }

    /// 浅合并：body 中出现的字段覆盖，uuid 永不改变。
    pub fn apply_to(self, target: &mut Excursion) {
        if let Some(v) = self.name {
            target.name = v;
        }
        if let Some(v) = self.height {
            target.height = v;
        }
        if let Some(v) = self.photo {
            target.photo = v;
        }
        if let Some(v) = self.timing {
            target.timing = v;
        }
        if let Some(v) = self.notes {
            target.notes = v;
        }
    }
}

/// 写操作的确认消息（沿用上游原型的响应形态与文案）
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[schema(example = json!({"message": "new entry succesfully created"}))]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::{ExcursionPatch, NewExcursion};

    fn valid_body() -> NewExcursion {
        NewExcursion {
            name: "Peak X".to_string(),
            height: 1500.0,
            photo: "https://picsum.photos/id/29/1024/768.webp".to_string(),
            timing: 90.0,
            notes: "ok".to_string(),
        }
    }

    #[test]
    fn new_excursion_validation() {
        assert!(valid_body().validate().is_ok());

        let mut bad = valid_body();
        bad.name = "   ".to_string();
        assert!(bad.validate().is_err());

        let mut bad = valid_body();
        bad.height = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = valid_body();
        bad.photo = "ftp://nope".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut record = valid_body().into_excursion("id-1".to_string());
        let patch = ExcursionPatch {
            notes: Some("updated".to_string()),
            ..ExcursionPatch::default()
        };
        patch.apply_to(&mut record);

        assert_eq!(record.notes, "updated");
        // 未出现的字段保持原值
        assert_eq!(record.name, "Peak X");
        assert_eq!(record.height, 1500.0);
        assert_eq!(record.uuid, "id-1");
    }

    #[test]
    fn patch_validation_checks_present_fields_only() {
        let ok = ExcursionPatch::default();
        assert!(ok.validate().is_ok());

        let bad = ExcursionPatch {
            timing: Some(-5.0),
            ..ExcursionPatch::default()
        };
        assert!(bad.validate().is_err());
    }
}
