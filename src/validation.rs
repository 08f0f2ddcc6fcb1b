//! Input validation for scheduling runs.
//!
//! Checks a ready queue before any policy mutates it. Detects:
//! - Empty ready queues
//! - Processes carrying the reserved priority `0`
//! - A zero round-robin quantum
//!
//! All issues are collected rather than stopping at the first one.

use crate::models::ProcessControlBlock;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The ready queue holds no processes.
    EmptyQueue,
    /// A process has the reserved priority value `0`.
    InvalidPriority,
    /// The round-robin quantum is zero.
    InvalidQuantum,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a ready queue.
///
/// Checks:
/// 1. At least one process
/// 2. Every process has a non-zero priority
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_ready_queue(processes: &[ProcessControlBlock]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyQueue,
            "Ready queue has no processes",
        ));
    }

    for (index, pcb) in processes.iter().enumerate() {
        if !pcb.has_valid_priority() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPriority,
                format!("Process {index} has reserved priority 0"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a round-robin quantum.
pub fn validate_quantum(quantum: u32) -> ValidationResult {
    if quantum == 0 {
        Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            "Round-robin quantum must be at least 1",
        )])
    } else {
        Ok(())
    }
}

/// Validates a ready queue together with a round-robin quantum.
pub fn validate_round_robin(processes: &[ProcessControlBlock], quantum: u32) -> ValidationResult {
    let mut errors = validate_quantum(quantum).err().unwrap_or_default();
    if let Err(queue_errors) = validate_ready_queue(processes) {
        errors.extend(queue_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_queue() -> Vec<ProcessControlBlock> {
        vec![
            ProcessControlBlock::new(5, 1, 0),
            ProcessControlBlock::new(3, 2, 1),
            ProcessControlBlock::new(8, 3, 2),
        ]
    }

    #[test]
    fn test_valid_queue() {
        assert!(validate_ready_queue(&sample_queue()).is_ok());
        assert!(validate_round_robin(&sample_queue(), 5).is_ok());
    }

    #[test]
    fn test_empty_queue() {
        let errors = validate_ready_queue(&[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyQueue);
    }

    #[test]
    fn test_zero_priority() {
        let mut queue = sample_queue();
        queue[1].priority = 0;

        let errors = validate_ready_queue(&queue).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidPriority && e.message.contains('1')));
    }

    #[test]
    fn test_zero_quantum() {
        let errors = validate_quantum(0).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidQuantum);
        assert!(validate_quantum(1).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let queue = vec![
            ProcessControlBlock::new(5, 0, 0),
            ProcessControlBlock::new(3, 0, 1),
        ];

        let errors = validate_round_robin(&queue, 0).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidQuantum);
    }
}
