//! 종목 이름 목록과 검색.
//!
//! 자주 조회되는 A주 종목의 정적 목록입니다. 응답의 표시 이름과
//! `/api/stock/search` 검색에 사용됩니다.

use serde::{Deserialize, Serialize};

/// 검색 결과 최대 개수.
pub const SEARCH_LIMIT: usize = 20;

/// (종목 코드, 이름)
const DIRECTORY: &[(&str, &str)] = &[
    ("000001", "平安银行"),
    ("000002", "万科A"),
    ("000063", "中兴通讯"),
    ("000100", "TCL科技"),
    ("000333", "美的集团"),
    ("000651", "格力电器"),
    ("000725", "京东方A"),
    ("000858", "五粮液"),
    ("000876", "新希望"),
    ("000895", "双汇发展"),
    ("000938", "紫光股份"),
    ("002024", "苏宁易购"),
    ("002027", "分众传媒"),
    ("002142", "宁波银行"),
    ("002230", "科大讯飞"),
    ("002241", "歌尔股份"),
    ("002415", "海康威视"),
    ("002475", "立讯精密"),
    ("002594", "比亚迪"),
    ("002714", "牧原股份"),
    ("300014", "亿纬锂能"),
    ("300059", "东方财富"),
    ("300122", "智飞生物"),
    ("300142", "沃森生物"),
    ("300750", "宁德时代"),
    ("600000", "浦发银行"),
    ("600009", "上海机场"),
    ("600010", "包钢股份"),
    ("600016", "民生银行"),
    ("600030", "中信证券"),
    ("600036", "招商银行"),
    ("600050", "中国联通"),
    ("600104", "上汽集团"),
    ("600111", "北方稀土"),
    ("600196", "复星医药"),
    ("600276", "恒瑞医药"),
    ("600309", "万华化学"),
    ("600519", "贵州茅台"),
    ("600570", "恒生电子"),
    ("600585", "海螺水泥"),
    ("600588", "用友网络"),
    ("600690", "海尔智家"),
    ("600703", "三安光电"),
    ("600745", "闻泰科技"),
    ("600809", "山西汾酒"),
    ("600837", "海通证券"),
    ("600887", "伊利股份"),
    ("601012", "隆基绿能"),
    ("601066", "中信建投"),
    ("601088", "中国神华"),
    ("601138", "工业富联"),
    ("601166", "兴业银行"),
    ("601169", "北京银行"),
    ("601186", "中国铁建"),
    ("601211", "国泰君安"),
    ("601288", "农业银行"),
    ("601318", "中国平安"),
    ("601328", "交通银行"),
    ("601398", "工商银行"),
    ("601601", "中国太保"),
    ("601628", "中国人寿"),
    ("601668", "中国建筑"),
    ("601688", "华泰证券"),
    ("601766", "中国中车"),
    ("601800", "中国交建"),
    ("601818", "光大银行"),
    ("601857", "中国石油"),
    ("601888", "中国中免"),
    ("601919", "中远海控"),
    ("601988", "中国银行"),
    ("601989", "中国重工"),
    ("603259", "药明康德"),
    ("603993", "洛阳钼业"),
];

/// 검색 결과 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub symbol: String,
    pub name: String,
}

/// 종목 코드로 이름을 찾습니다.
pub fn name_of(symbol: &str) -> Option<&'static str> {
    DIRECTORY
        .iter()
        .find(|(code, _)| *code == symbol)
        .map(|(_, name)| *name)
}

/// 이름 또는 코드에 검색어가 포함된 종목을 최대 `limit`개 반환합니다.
///
/// 이름은 대소문자를 구분하지 않으며, "万科A"처럼 A 접미사가 붙은 이름은
/// A를 뺀 이름으로도 비교합니다. 빈 검색어는 목록 앞부분을 그대로 반환합니다.
pub fn search(query: &str, limit: usize) -> Vec<StockInfo> {
    let query = query.trim();
    let lowered = query.to_lowercase();

    DIRECTORY
        .iter()
        .filter(|(code, name)| {
            query.is_empty()
                || name.to_lowercase().contains(&lowered)
                || code.contains(query)
                || name.replace('A', "").to_lowercase().contains(&lowered)
        })
        .take(limit)
        .map(|(code, name)| StockInfo {
            symbol: (*code).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_of() {
        assert_eq!(name_of("000001"), Some("平安银行"));
        assert_eq!(name_of("600519"), Some("贵州茅台"));
        assert_eq!(name_of("999999"), None);
    }

    #[test]
    fn test_search_by_name_and_code() {
        let banks = search("银行", SEARCH_LIMIT);
        assert!(banks.iter().any(|s| s.symbol == "600036"));
        assert!(banks.iter().all(|s| s.name.contains("银行")));

        let by_code = search("3007", SEARCH_LIMIT);
        assert_eq!(by_code, vec![StockInfo { symbol: "300750".into(), name: "宁德时代".into() }]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let tcl = search("tcl", SEARCH_LIMIT);
        assert_eq!(tcl.len(), 1);
        assert_eq!(tcl[0].symbol, "000100");
    }

    #[test]
    fn test_search_limit() {
        assert_eq!(search("", SEARCH_LIMIT).len(), SEARCH_LIMIT);
        assert!(search("60", 5).len() <= 5);
        assert!(search("不存在的股票", SEARCH_LIMIT).is_empty());
    }
}
