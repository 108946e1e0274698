//! BSON 시각과 chrono 시각 사이 변환
//!
//! 저장소는 `bson::DateTime`(밀리초)을, API 응답은 `chrono::DateTime<Utc>`를 사용합니다.

use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson;

pub fn to_utc(value: bson::DateTime) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(value.timestamp_millis())
        .single()
        .unwrap_or_default()
}

pub fn from_utc(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}
