/// Command-line dispatch by argument count
use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

/// What the process should do, decided from its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Live terminal view
    Interactive,
    /// Render once at `angle` and write the image to `output`
    Offline { angle: f32, output: PathBuf },
    /// Leave immediately without output
    Exit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("invalid rotation angle {value:?}: {source}")]
    InvalidAngle {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

fn parse_angle(value: &str) -> Result<f32, CliError> {
    value.parse().map_err(|source| CliError::InvalidAngle {
        value: value.to_string(),
        source,
    })
}

/// Decide the run mode from the full argument list, program name included.
///
/// * `prog` or `prog <flag>`: interactive
/// * `prog <flag> <angle>`: the angle is validated, then nothing is rendered
/// * `prog <flag> <angle> <file>`: offline render to `file`
/// * anything longer: exit
pub fn parse_args<I, S>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();

    match args.as_slice() {
        [] | [_] | [_, _] => Ok(Invocation::Interactive),
        [_, _, angle] => {
            parse_angle(angle)?;
            Ok(Invocation::Exit)
        }
        [_, _, angle, output] => Ok(Invocation::Offline {
            angle: parse_angle(angle)?,
            output: PathBuf::from(output),
        }),
        _ => Ok(Invocation::Exit),
    }
}
