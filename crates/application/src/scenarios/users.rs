//! Users scenarios.

use restcheck_domain::{FieldPath, FieldSpec, Operation, Resource, ResourceId};
use serde_json::Value;

use super::ScenarioContext;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

const USER_LIST_FIELDS: [&str; 4] = ["id", "name", "username", "email"];

const USER_FIELDS: [&str; 8] = [
    "id", "name", "username", "email", "address", "phone", "website", "company",
];

pub(super) async fn get_all_users<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> ApplicationResult<()> {
    ctx.verify_listing(&Resource::users(), "user", &USER_LIST_FIELDS, "Sample Users")
        .await
}

pub(super) async fn get_user_by_id<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> ApplicationResult<()> {
    let id = ResourceId::from(1_u64);
    let user = fetch_user(ctx, &id).await?;

    {
        let mut step = ctx.report.step("Verify user has expected fields");
        step.check(
            ctx.verifier
                .verify_fields_present(&user, &FieldSpec::all(&USER_FIELDS)),
        )?;
    }
    {
        let mut step = ctx.report.step("Verify user ID matches requested ID");
        step.check(ctx.verifier.verify_field_equals(
            &user,
            &FieldPath::field("id"),
            &id.to_json(),
        ))?;
    }
    {
        let mut step = ctx.report.step("User data");
        step.capture(&user, format!("User {id}"));
    }
    Ok(())
}

pub(super) async fn user_company_info<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> ApplicationResult<()> {
    let id = ResourceId::from(2_u64);
    let user = fetch_user(ctx, &id).await?;

    {
        let mut step = ctx.report.step("Verify company information");
        step.check(ctx.verifier.verify_fields_present(
            &user,
            &[FieldSpec::nested("company", ["name", "catchPhrase", "bs"])],
        ))?;
    }
    {
        let mut step = ctx.report.step("Company data");
        step.capture(&user["company"], format!("Company Info for User {id}"));
    }
    Ok(())
}

pub(super) async fn user_address<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> ApplicationResult<()> {
    let id = ResourceId::from(3_u64);
    let user = fetch_user(ctx, &id).await?;

    {
        let mut step = ctx.report.step("Verify address information");
        let address = FieldSpec::nested(
            "address",
            [
                FieldSpec::new("street"),
                FieldSpec::new("suite"),
                FieldSpec::new("city"),
                FieldSpec::new("zipcode"),
                FieldSpec::nested("geo", ["lat", "lng"]),
            ],
        );
        step.check(ctx.verifier.verify_fields_present(&user, &[address]))?;
    }
    {
        let mut step = ctx.report.step("Address data");
        step.capture(&user["address"], format!("Address Info for User {id}"));
    }
    Ok(())
}

async fn fetch_user<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
    id: &ResourceId,
) -> ApplicationResult<Value> {
    let response = {
        let _step = ctx
            .report
            .step(format!("Send GET request to /users/{id} endpoint"));
        ctx.client.get(&Resource::users(), id).await?
    };
    ctx.verify_success(&response, Operation::Get)?;
    ctx.parse_json(&response)
}
