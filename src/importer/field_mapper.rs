// ==========================================
// AV BOQ 生成引擎 - 字段映射器实现
// ==========================================
// 阶段 1: 源列名 → 标准字段（别名容错,大小写/空白不敏感）
// ==========================================

use crate::domain::catalog::RawProductRecord;
use crate::importer::catalog_importer_trait::FieldMapper;
use std::collections::HashMap;

/// 标准字段 → 可接受的列名别名（已归一化: 小写字母数字）
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("name", &["name", "productname", "product", "itemname", "description1"]),
    ("brand", &["brand", "manufacturer", "make", "vendor", "oem"]),
    ("model_number", &["modelnumber", "model", "modelno", "sku", "partnumber", "partno", "mpn"]),
    ("category", &["category", "primarycategory", "productcategory", "cat"]),
    ("sub_category", &["subcategory", "subcat", "type", "producttype"]),
    ("price", &["price", "priceusd", "unitprice", "listprice", "msrp", "cost", "priceinr"]),
    ("description", &["description", "desc", "details", "features", "specifications", "specs"]),
    ("size", &["size", "sizeinches", "screensize", "diagonal", "displaysize", "sizein"]),
    ("power", &["power", "powerwatts", "powerconsumption", "watts", "powerdraw", "powerw"]),
];

fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

pub struct CatalogFieldMapper;

impl CatalogFieldMapper {
    /// 判断表头中是否存在某标准字段
    pub fn has_field(&self, headers: &[String], field: &str) -> bool {
        let Some((_, aliases)) = FIELD_ALIASES.iter().find(|(f, _)| *f == field) else {
            return false;
        };
        headers
            .iter()
            .map(|h| normalize_header(h))
            .any(|h| aliases.contains(&h.as_str()))
    }

    /// 按别名优先级取第一个非空值
    fn get_string(&self, row: &HashMap<String, String>, field: &str) -> Option<String> {
        let (_, aliases) = FIELD_ALIASES.iter().find(|(f, _)| *f == field)?;

        // 行内列名按归一化后建索引,保证别名顺序即优先级
        let normalized: HashMap<String, &String> =
            row.iter().map(|(k, v)| (normalize_header(k), v)).collect();

        aliases.iter().find_map(|alias| {
            normalized
                .get(*alias)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }
}

impl FieldMapper for CatalogFieldMapper {
    fn map_to_raw_product(&self, row: &HashMap<String, String>, row_number: usize) -> RawProductRecord {
        RawProductRecord {
            name: self.get_string(row, "name"),
            brand: self.get_string(row, "brand"),
            model_number: self.get_string(row, "model_number"),
            category: self.get_string(row, "category"),
            sub_category: self.get_string(row, "sub_category"),
            price: self.get_string(row, "price"),
            description: self.get_string(row, "description"),
            size: self.get_string(row, "size"),
            power: self.get_string(row, "power"),
            row_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_maps_aliases_case_insensitively() {
        let r = row(&[
            ("Product Name", "Rally Bar"),
            ("Manufacturer", "Logitech"),
            ("SKU", "960-001308"),
            ("Category", "Video Conferencing"),
            ("Sub-Category", "Video Bar"),
            ("Price (USD)", "$3,999.00"),
        ]);
        let raw = CatalogFieldMapper.map_to_raw_product(&r, 2);
        assert_eq!(raw.name.as_deref(), Some("Rally Bar"));
        assert_eq!(raw.brand.as_deref(), Some("Logitech"));
        assert_eq!(raw.model_number.as_deref(), Some("960-001308"));
        assert_eq!(raw.sub_category.as_deref(), Some("Video Bar"));
        assert_eq!(raw.price.as_deref(), Some("$3,999.00"));
        assert_eq!(raw.size, None);
        assert_eq!(raw.row_number, 2);
    }

    #[test]
    fn test_blank_values_are_none() {
        let r = row(&[("name", "X"), ("brand", "   ")]);
        let raw = CatalogFieldMapper.map_to_raw_product(&r, 3);
        assert_eq!(raw.brand, None);
    }

    #[test]
    fn test_has_field() {
        let headers = vec!["Product Name".to_string(), "Cat".to_string()];
        assert!(CatalogFieldMapper.has_field(&headers, "name"));
        assert!(CatalogFieldMapper.has_field(&headers, "category"));
        assert!(!CatalogFieldMapper.has_field(&headers, "price"));
    }
}
