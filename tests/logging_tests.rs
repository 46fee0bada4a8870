//! Log output emitted by the writer.
//!
//! Kept in its own test binary because `logtest` installs a process-wide
//! logger.

#[path = "test_utils/mod.rs"]
mod test_utils;

use log::Level;
use logtest::{Logger, Record};
use slswriter::Message;
use test_utils::{CapturingTransport, writer};

const ERROR_BODY: &str = r#"{"errorCode":"ParameterInvalid","errorMessage":"http extend authorization : LOG :WL2xp3EYvKpsIGgwE3s5HHK7M/c= pair is invalid"}"#;

fn drain(logger: &mut Logger) -> Vec<Record> {
    std::iter::from_fn(|| logger.pop()).collect()
}

#[test]
fn writer_logs_stages_and_rejections() {
    let mut logger = Logger::start();

    let accepted = writer(CapturingTransport::new(200));
    accepted
        .write_message(&[Message::now().with_content("k", "v")])
        .expect("write");
    let records = drain(&mut logger);
    assert!(
        records
            .iter()
            .any(|r| r.level() == Level::Debug && r.args().contains("encoded 1 records"))
    );
    assert!(
        records
            .iter()
            .any(|r| r.level() == Level::Debug && r.args().contains("received status 200"))
    );
    assert!(records.iter().all(|r| r.level() != Level::Warn));

    let rejected = writer(CapturingTransport::with_body(401, ERROR_BODY));
    rejected
        .write_message(&[Message::now()])
        .expect_err("write should fail");
    let records = drain(&mut logger);
    let warning = records
        .iter()
        .find(|r| r.level() == Level::Warn)
        .expect("no warning produced");
    assert!(warning.args().contains("status=401"));
    assert!(warning.args().contains("code=ParameterInvalid"));
    assert!(warning.args().contains("request_id=req-1"));

    assert!(drain(&mut logger).is_empty());
    rejected.write_message(&[]).expect("empty batch");
    assert!(drain(&mut logger).is_empty());
}
