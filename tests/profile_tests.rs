use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::TestEnv;

#[test]
fn test_profile_shows_seed_values() {
    let env = TestEnv::new("profile_show");
    env.init_and_login();

    env.th()
        .arg("profile")
        .assert()
        .success()
        .stdout(contains("My Profile").and(contains("9999999999")));
}

#[test]
fn test_profile_rejects_short_mobile() {
    let env = TestEnv::new("profile_mobile");
    env.init_and_login();

    env.th()
        .args(["profile", "update", "--set", "mobile=12345"])
        .assert()
        .failure()
        .stderr(contains("Mobile must be 10 digits"));

    env.th()
        .args(["show", "profile"])
        .assert()
        .success()
        .stdout(contains("9999999999"));
}

#[test]
fn test_profile_update_is_persisted() {
    let env = TestEnv::new("profile_update");
    env.init_and_login();

    env.th()
        .args(["profile", "update", "--set", "fullName=Ops Lead"])
        .assert()
        .success()
        .stdout(contains("Profile updated"));

    env.th()
        .arg("profile")
        .assert()
        .success()
        .stdout(contains("Ops Lead"));
}
