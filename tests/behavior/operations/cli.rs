use crate::*;
use assert_cmd::prelude::*;
use libtest_mimic::{Failed, Trial};
use predicates::prelude::*;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.push(Trial::test(
        "behavior::e2e_upload_missing_file_fails_softly",
        e2e_upload_missing_file_fails_softly,
    ));
    tests.push(Trial::test(
        "behavior::e2e_unreachable_webdav_reports_json_failure",
        e2e_unreachable_webdav_reports_json_failure,
    ));
    tests.push(Trial::test(
        "behavior::e2e_help_lists_storage_verbs",
        e2e_help_lists_storage_verbs,
    ));
}

fn e2e_upload_missing_file_fails_softly() -> std::result::Result<(), Failed> {
    let local = tempfile::tempdir().map_err(|e| Failed::from(e.to_string()))?;
    let missing = local.path().join("local.txt");

    ctmu_cmd()
        .arg("s3")
        .arg("upload")
        .arg(&missing)
        .arg("bucket")
        .arg("--key")
        .arg("demo/test.txt")
        .arg("--region")
        .arg("us-east-1")
        .arg("--endpoint")
        .arg("http://127.0.0.1:9")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Local file not found"));
    Ok(())
}

fn e2e_unreachable_webdav_reports_json_failure() -> std::result::Result<(), Failed> {
    ctmu_cmd()
        .arg("--json")
        .arg("nextcloud")
        .arg("list")
        .arg("/demo/")
        .arg("-u")
        .arg("http://127.0.0.1:9/remote.php/dav/files/user/")
        .arg("--username")
        .arg("user")
        .arg("--password")
        .arg("pass")
        .assert()
        .failure()
        .stdout(
            predicate::str::contains(r#""ok":false"#)
                .and(predicate::str::contains(r#""kind":"connection""#)),
        );
    Ok(())
}

fn e2e_help_lists_storage_verbs() -> std::result::Result<(), Failed> {
    ctmu_cmd()
        .arg("nextcloud")
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("upload")
                .and(predicate::str::contains("download"))
                .and(predicate::str::contains("list"))
                .and(predicate::str::contains("delete"))
                .and(predicate::str::contains("mkdir")),
        );
    Ok(())
}
