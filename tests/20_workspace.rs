mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_grants_primary_owner_and_general_channel() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = common::sign_up_and_login(&server.base_url, "owner").await?;

    let res = client
        .post(format!("{}/api/workspace/create", server.base_url))
        .bearer_auth(&owner.token)
        .json(&json!({ "name": common::unique_name("ws") }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let workspace = res.json::<Value>().await?;
    let workspace_id = workspace["id"].as_i64().unwrap();
    assert!(workspace_id > 0);
    assert_eq!(workspace["primary_owner_id"].as_i64().unwrap(), owner.id);

    // The creator holds the primary-owner role
    let res = client
        .get(format!(
            "{}/api/workspace/get_users/{}",
            server.base_url, workspace_id
        ))
        .bearer_auth(&owner.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let members = res.json::<Value>().await?;
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["id"].as_i64().unwrap(), owner.id);
    assert_eq!(members[0]["role_id"].as_i64().unwrap(), 1);

    // A public "general" channel exists and the creator is in it
    let res = client
        .get(format!(
            "{}/api/channel/get_by_user_and_workspace/{}",
            server.base_url, workspace_id
        ))
        .bearer_auth(&owner.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let channels = res.json::<Value>().await?;
    let general = channels
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "general")
        .expect("general channel missing");
    assert_eq!(general["is_private"], false);
    assert_eq!(general["is_archive"], false);

    Ok(())
}

#[tokio::test]
async fn create_rejects_empty_and_duplicate_names() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = common::sign_up_and_login(&server.base_url, "owner").await?;
    let name = common::unique_name("ws");

    let res = client
        .post(format!("{}/api/workspace/create", server.base_url))
        .bearer_auth(&owner.token)
        .json(&json!({ "name": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/api/workspace/create", server.base_url))
        .bearer_auth(&owner.token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Name uniqueness is global, even across owners
    let other = common::sign_up_and_login(&server.base_url, "other").await?;
    let res = client
        .post(format!("{}/api/workspace/create", server.base_url))
        .bearer_auth(&other.token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn add_member_validates_role_and_rank() -> Result<()> {
    let server = common::ensure_server().await?;
    let owner = common::sign_up_and_login(&server.base_url, "owner").await?;
    let member = common::sign_up_and_login(&server.base_url, "member").await?;
    let outsider = common::sign_up_and_login(&server.base_url, "outsider").await?;
    let workspace_id = common::create_workspace(&server.base_url, &owner.token, "ws").await?;

    // The primary-owner role can never be assigned
    let status =
        common::add_workspace_member(&server.base_url, &owner.token, workspace_id, member.id, 1)
            .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown role ids are rejected the same way
    let status =
        common::add_workspace_member(&server.base_url, &owner.token, workspace_id, member.id, 9)
            .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nonexistent workspace
    let status =
        common::add_workspace_member(&server.base_url, &owner.token, 999_999_999, member.id, 4)
            .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Plain members (rank 4) cannot add anyone
    let status =
        common::add_workspace_member(&server.base_url, &owner.token, workspace_id, member.id, 4)
            .await?;
    assert_eq!(status, StatusCode::OK);
    let status =
        common::add_workspace_member(&server.base_url, &member.token, workspace_id, outsider.id, 4)
            .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Duplicate membership maps the unique-constraint violation to 409
    let status =
        common::add_workspace_member(&server.base_url, &owner.token, workspace_id, member.id, 4)
            .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn remove_member_protects_the_primary_owner() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = common::sign_up_and_login(&server.base_url, "owner").await?;
    let admin = common::sign_up_and_login(&server.base_url, "admin").await?;
    let member = common::sign_up_and_login(&server.base_url, "member").await?;
    let workspace_id = common::create_workspace(&server.base_url, &owner.token, "ws").await?;

    common::add_workspace_member(&server.base_url, &owner.token, workspace_id, admin.id, 2)
        .await?;
    common::add_workspace_member(&server.base_url, &owner.token, workspace_id, member.id, 4)
        .await?;

    // Even a ranked member cannot remove the primary owner
    let res = client
        .delete(format!("{}/api/workspace/delete_user", server.base_url))
        .bearer_auth(&admin.token)
        .json(&json!({ "workspace_id": workspace_id, "user_id": owner.id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Plain members cannot remove anyone
    let res = client
        .delete(format!("{}/api/workspace/delete_user", server.base_url))
        .bearer_auth(&member.token)
        .json(&json!({ "workspace_id": workspace_id, "user_id": admin.id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // An admin removing a plain member succeeds and returns the membership
    let res = client
        .delete(format!("{}/api/workspace/delete_user", server.base_url))
        .bearer_auth(&admin.token)
        .json(&json!({ "workspace_id": workspace_id, "user_id": member.id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let membership = res.json::<Value>().await?;
    assert_eq!(membership["user_id"].as_i64().unwrap(), member.id);

    // Removing an already-removed membership is NotFound, not a silent success
    let res = client
        .delete(format!("{}/api/workspace/delete_user", server.base_url))
        .bearer_auth(&admin.token)
        .json(&json!({ "workspace_id": workspace_id, "user_id": member.id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn rename_is_gated_and_conflict_checked() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = common::sign_up_and_login(&server.base_url, "owner").await?;
    let member = common::sign_up_and_login(&server.base_url, "member").await?;
    let workspace_id = common::create_workspace(&server.base_url, &owner.token, "ws").await?;
    let other_id = common::create_workspace(&server.base_url, &owner.token, "ws").await?;

    common::add_workspace_member(&server.base_url, &owner.token, workspace_id, member.id, 4)
        .await?;

    // Plain members cannot rename
    let res = client
        .post(format!("{}/api/workspace/rename", server.base_url))
        .bearer_auth(&member.token)
        .json(&json!({ "workspace_id": workspace_id, "name": common::unique_name("ws") }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The owner can; the new name comes back
    let new_name = common::unique_name("ws-renamed");
    let res = client
        .post(format!("{}/api/workspace/rename", server.base_url))
        .bearer_auth(&owner.token)
        .json(&json!({ "workspace_id": workspace_id, "name": new_name }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let workspace = res.json::<Value>().await?;
    assert_eq!(workspace["name"], new_name.as_str());

    // Renaming onto another workspace's name conflicts
    let res = client
        .post(format!("{}/api/workspace/rename", server.base_url))
        .bearer_auth(&owner.token)
        .json(&json!({ "workspace_id": other_id, "name": new_name }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn listings_are_membership_scoped() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let owner = common::sign_up_and_login(&server.base_url, "owner").await?;
    let outsider = common::sign_up_and_login(&server.base_url, "outsider").await?;
    let workspace_id = common::create_workspace(&server.base_url, &owner.token, "ws").await?;

    // The creator sees the workspace in their listing
    let res = client
        .get(format!("{}/api/workspace/get_by_user", server.base_url))
        .bearer_auth(&owner.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let workspaces = res.json::<Value>().await?;
    assert!(workspaces
        .as_array()
        .unwrap()
        .iter()
        .any(|w| w["id"].as_i64() == Some(workspace_id)));

    // A user with no memberships gets an empty list, not an error
    let res = client
        .get(format!("{}/api/workspace/get_by_user", server.base_url))
        .bearer_auth(&outsider.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.json::<Value>().await?.as_array().unwrap().is_empty());

    // Member listing requires membership
    let res = client
        .get(format!(
            "{}/api/workspace/get_users/{}",
            server.base_url, workspace_id
        ))
        .bearer_auth(&outsider.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
