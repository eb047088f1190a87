// Adapters layer: 對外部系統 (檔案系統等) 的具體實作

pub mod storage;
