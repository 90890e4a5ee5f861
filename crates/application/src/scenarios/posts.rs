//! Posts scenarios.

use restcheck_domain::{Expectation, FieldPath, FieldSpec, Operation, Payload, Resource};
use serde_json::Value;

use super::ScenarioContext;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

const POST_FIELDS: [&str; 4] = ["id", "title", "body", "userId"];

pub(super) async fn get_all_posts<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> ApplicationResult<()> {
    ctx.verify_listing(&Resource::posts(), "post", &POST_FIELDS, "Sample Posts")
        .await
}

pub(super) async fn get_post_by_id<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> ApplicationResult<()> {
    let posts = Resource::posts();
    let id = ctx.fixtures.post_id();
    drop(ctx.report.step(format!("Testing with post ID: {id}")));

    let response = {
        let _step = ctx
            .report
            .step(format!("Send GET request to /posts/{id} endpoint"));
        ctx.client.get(&posts, &id).await?
    };
    ctx.verify_success(&response, Operation::Get)?;
    let post = ctx.parse_json(&response)?;

    {
        let mut step = ctx.report.step("Verify post has expected fields");
        step.check(
            ctx.verifier
                .verify_fields_present(&post, &FieldSpec::all(&POST_FIELDS)),
        )?;
    }
    {
        let mut step = ctx.report.step("Verify post ID matches requested ID");
        step.check(ctx.verifier.verify_field_equals(
            &post,
            &FieldPath::field("id"),
            &id.to_json(),
        ))?;
    }
    {
        let mut step = ctx.report.step("Post data");
        step.capture(&post, format!("Post {id}"));
    }
    Ok(())
}

pub(super) async fn create_post<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> ApplicationResult<()> {
    let posts = Resource::posts();
    let payload = ctx.fixtures.post_payload();
    drop(ctx.report.step(format!(
        "Creating post with title: {}",
        text_of(payload.get("title"))
    )));

    let response = {
        let _step = ctx.report.step("Send POST request to /posts endpoint");
        ctx.client.create(&posts, &payload).await?
    };

    let expectation = Expectation::status(ctx.conventions.create.clone())
        .record()
        .require(POST_FIELDS)
        .echoes(&payload);
    {
        let mut step = ctx.report.step("Verify post data matches input");
        step.verdict(ctx.verifier.verify(&response, &expectation))?;
    }

    let created = ctx.parse_json(&response)?;
    {
        let mut step = ctx.report.step("Created post data");
        step.capture(&created, "Created Post");
    }
    Ok(())
}

pub(super) async fn update_post<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> ApplicationResult<()> {
    let posts = Resource::posts();
    let id = ctx.fixtures.post_id();
    let base = ctx.fixtures.post_payload();
    let mut updated = Payload::new()
        .with("title", format!("Updated: {}", text_of(base.get("title"))))
        .with("body", format!("Updated: {}", text_of(base.get("body"))));
    if let Some(user_id) = base.get("userId") {
        updated.insert("userId", user_id.clone());
    }

    let response = {
        let _step = ctx
            .report
            .step(format!("Send PUT request to /posts/{id} endpoint"));
        ctx.client.update(&posts, &id, &updated).await?
    };

    let expectation = Expectation::status(ctx.conventions.update.clone())
        .record()
        .require(POST_FIELDS)
        .echoes(&updated);
    {
        let mut step = ctx.report.step("Verify post data matches updated input");
        step.verdict(ctx.verifier.verify(&response, &expectation))?;
    }

    let post = ctx.parse_json(&response)?;
    {
        let mut step = ctx.report.step("Updated post data");
        step.capture(&post, format!("Updated Post {id}"));
    }
    Ok(())
}

pub(super) async fn delete_post<C: HttpClient>(
    ctx: &mut ScenarioContext<'_, C>,
) -> ApplicationResult<()> {
    let posts = Resource::posts();
    let id = ctx.fixtures.post_id();

    let response = {
        let _step = ctx
            .report
            .step(format!("Send DELETE request to /posts/{id} endpoint"));
        ctx.client.delete(&posts, &id).await?
    };

    let mut step = ctx.report.step("Verify successful deletion.");
    step.check(
        ctx.verifier
            .verify_status(&response, ctx.conventions.expected_for(Operation::Delete)),
    )?;
    Ok(())
}

/// Renders a payload value for step titles without JSON quoting.
fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
