// Domain layer: 預測相關的資料模型與介面 (ports)，不依賴 HTTP 或檔案系統

pub mod model;
pub mod ports;
