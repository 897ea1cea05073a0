//! Insurance packages available to the practice

use crate::adapters::athena::Connection;
use crate::domain::Result;
use crate::models::request::{GetCommonInsurancePackagesFilter, GetTopInsurancePackagesFilter};
use crate::models::response::{CommonInsurancePackage, InsurancePackageResponse, TopInsurancePackage};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct InsurancePackageClient {
    connection: Arc<Connection>,
}

impl InsurancePackageClient {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// Most used packages, optionally within one department
    pub async fn top(
        &self,
        filter: Option<&GetTopInsurancePackagesFilter>,
    ) -> Result<InsurancePackageResponse<TopInsurancePackage>> {
        self.connection
            .fetch("misc/topinsurancepackages")
            .query_opt(filter)
            .send()
            .await
    }

    /// # Errors
    ///
    /// `Validation` (400) for an unknown department.
    pub async fn common(
        &self,
        filter: &GetCommonInsurancePackagesFilter,
    ) -> Result<InsurancePackageResponse<CommonInsurancePackage>> {
        self.connection
            .fetch("insurancepackages/common")
            .query(filter)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::InboundResponse;
    use crate::clients::testing::{connection, ScriptedExecutor};
    use crate::domain::AthenaError;

    #[tokio::test]
    async fn test_top_packages() {
        let executor = ScriptedExecutor::new(vec![InboundResponse::json(
            200,
            r#"{"totalcount":2,"insurancepackages":[
                {"insurancepackageid":"-500","name":"Self Pay","percentage":"40","ranking":"1"},
                {"insurancepackageid":"0","name":"Unknown","percentage":"10","ranking":"2"}
            ]}"#,
        )]);
        let client = InsurancePackageClient::new(connection(executor.clone()));

        let top = client.top(None).await.unwrap();
        assert_eq!(top.totalcount, 2);
        assert_eq!(top.insurancepackages[0].id.as_str(), "-500");
        assert_eq!(top.insurancepackages[1].ranking.as_deref(), Some("2"));
        assert_eq!(executor.last_request().path, "preview1/195900/misc/topinsurancepackages");
    }

    #[tokio::test]
    async fn test_common_packages_query() {
        let executor = ScriptedExecutor::new(vec![InboundResponse::json(
            200,
            r#"{"totalcount":1,"insurancepackages":[{"insurancepackageid":31724,"name":"BCBS"}]}"#,
        )]);
        let client = InsurancePackageClient::new(connection(executor.clone()));
        let mut filter = GetCommonInsurancePackagesFilter::new(1);
        filter.show_only_case_policies = Some(true);

        let common = client.common(&filter).await.unwrap();
        assert_eq!(common.insurancepackages[0].id.as_u64(), Some(31724));

        let request = executor.last_request();
        assert_eq!(request.query_value("departmentid"), Some("1"));
        assert_eq!(request.query_value("showonlycasepolicies"), Some("true"));
    }

    #[tokio::test]
    async fn test_unknown_department_is_validation() {
        let executor = ScriptedExecutor::new(vec![InboundResponse::json(
            400,
            r#"{"error":"Invalid department","missingfields":["departmentid"]}"#,
        )]);
        let client = InsurancePackageClient::new(connection(executor));

        let err = client
            .common(&GetCommonInsurancePackagesFilter::new(999))
            .await
            .unwrap_err();
        assert!(matches!(err, AthenaError::Validation { .. }));
    }
}
