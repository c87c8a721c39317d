//! Motor channel listing

use anyhow::Result;
use colored::*;
use handdrive_protocol::{MotorCommand, MotorId, MotorRole};
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
struct MotorInfo {
    id: MotorId,
    role: MotorRole,
    description: &'static str,
}

/// Execute motors command
pub fn execute(json: bool) -> Result<()> {
    let motors: Vec<MotorInfo> = MotorId::all()
        .map(|id| MotorInfo {
            id,
            role: id.role(),
            description: id.role().description(),
        })
        .collect();

    if json {
        return output::print_json("motors", &motors);
    }

    println!("{}", "Motor channels:".bold());
    for motor in &motors {
        println!("  {}  {}", motor.id.to_string().bold(), motor.description);
    }
    println!();
    println!("{}", "Commands:".bold());
    for command in [
        MotorCommand::Stop,
        MotorCommand::Forward,
        MotorCommand::Backward,
        MotorCommand::Idle,
    ] {
        println!("  {}  {}", command.code().to_string().bold(), command);
    }
    Ok(())
}
