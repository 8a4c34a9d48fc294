//! Where each dataset comes from and under which terms it may be reused.

use crate::record::DatasetKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataSource {
    pub provider: &'static str,
    pub description: &'static str,
    pub url: Option<&'static str>,
    pub data_year: &'static str,
    pub license: &'static str,
}

const WORLD_BANK: DataSource = DataSource {
    provider: "World Bank API",
    description: "GDP and population by country",
    url: Some("https://datahelpdesk.worldbank.org/knowledgebase/articles/898599"),
    data_year: "2023",
    license: "Creative Commons Attribution 4.0",
};

const PREFECTURAL_ACCOUNTS: DataSource = DataSource {
    provider: "Cabinet Office, Prefectural Accounts",
    description: "GDP and population by Japanese prefecture",
    url: Some("https://www.esri.cao.go.jp/jp/sna/sonota/kenmin/kenmin_top.html"),
    data_year: "FY2022",
    license: "Government of Japan Standard Terms of Use",
};

const COMPANY_SAMPLE: DataSource = DataSource {
    provider: "Company revenue sample",
    description: "Revenue and headcount of listed companies (sample data)",
    url: None,
    data_year: "2023",
    license: "Sample data",
};

const MUNICIPAL_SAMPLE: DataSource = DataSource {
    provider: "Municipal GDP sample",
    description: "Estimated GDP and population of major municipalities (sample data)",
    url: None,
    data_year: "2023",
    license: "Sample data",
};

pub fn source_for(kind: DatasetKind) -> &'static DataSource {
    match kind {
        DatasetKind::Country => &WORLD_BANK,
        DatasetKind::Prefecture => &PREFECTURAL_ACCOUNTS,
        DatasetKind::Company => &COMPANY_SAMPLE,
        DatasetKind::Municipality => &MUNICIPAL_SAMPLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_is_attributed() {
        for kind in DatasetKind::ALL {
            let source = source_for(kind);
            assert!(!source.provider.is_empty(), "{kind}");
            assert!(!source.license.is_empty(), "{kind}");
        }
    }

    #[test]
    fn test_world_bank_license() {
        let source = source_for(DatasetKind::Country);
        assert_eq!(source.license, "Creative Commons Attribution 4.0");
        assert!(source.url.is_some_and(|u| u.starts_with("https://")));
        assert_eq!(source_for(DatasetKind::Company).url, None);
    }
}
