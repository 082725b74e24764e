//! Higher-level constructs for g-code emission

use paste::paste;

use super::{Field, Token, Value};

/// A macro for quickly instantiating a command
///
/// Parameter letters are written uppercase and values are [crate::emit::Value]
/// expressions:
///
/// ```
/// use gcode_corpus::command;
/// use gcode_corpus::emit::Value;
/// let cmd = command!(linear_move { X: Value::axis(1.5), F: Value::Integer(1500) });
/// assert_eq!(cmd.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "), "G1 X1.500 F1500");
/// ```
#[macro_export]
macro_rules! command {
    ($constructor: ident {
        $($letter: ident : $value: expr),* $(,)?
    }) => {
        $crate::emit::command::$constructor(
            vec![$(
                $crate::emit::Field {
                    letters: ::std::borrow::Cow::Borrowed(stringify!($letter)),
                    value: $value,
                }
            ,)*].into_iter()
        )
    };
}

macro_rules! impl_commands {
    ($($(#[$outer:meta])* $commandName: ident {$letters: expr, $value: literal, {$($(#[$inner:meta])* $arg: ident), *} } )*) => {

        paste! {
            $(
                $(#[$outer])*
                ///
                /// To instantiate the command, call this function
                /// or use the [crate::command] macro.
                pub fn [<$commandName:snake:lower>]<'a, I: Iterator<Item = Field<'a>>>(args: I) -> Command<'a> {
                    Command {
                        name: [<$commandName:snake:upper _FIELD>].clone(),
                        args: args.filter(|arg| {
                            match arg.letters.to_ascii_uppercase().as_str() {
                                $(stringify!($arg) => true,)*
                                _ => false
                            }
                        }).collect(),
                    }
                }

                /// Constant for this command's name used to reduce allocations.
                pub const [<$commandName:snake:upper _FIELD>]: Field<'static> = Field {
                    letters: std::borrow::Cow::Borrowed($letters),
                    value: Value::Integer($value),
                };
            )*
        }

        /// Commands are the operational unit of g-code
        ///
        /// They consist of a G, M, or other top-level field followed by field arguments
        #[derive(Clone, PartialEq, Debug)]
        pub struct Command<'a> {
            name: Field<'a>,
            args: Vec<Field<'a>>,
        }

        impl<'a> Command<'a> {
            /// Add a field to the command.
            ///
            /// Returns an error if the Field's letters aren't recognized.
            pub fn push(&mut self, arg: Field<'a>) -> Result<(), &'static str> {
                paste!{
                    match &self.name {
                        $(x if *x == [<$commandName:snake:upper _FIELD>] => {
                            if match arg.letters.as_ref() {
                                $(stringify!([<$arg:upper>]) => {true},)*
                                $(stringify!([<$arg:lower>]) => {true},)*
                                _ => false,
                            } {
                                self.args.push(arg);
                                Ok(())
                            } else {
                                Err(concat!($(stringify!([<$arg:lower>]), " ", stringify!([<$arg:upper>]), " ", )*))
                            }
                        },)*
                        _ => {
                            unreachable!("a command's name cannot change");
                        }
                    }
                }
            }

            /// Iterate over all fields including the command's name (i.e. G1 for a linear move)
            pub fn iter(&self) -> impl Iterator<Item = &Field> {
                std::iter::once(&self.name).chain(self.args.iter())
            }

            /// Consumes the command to produce tokens suitable for output
            pub fn into_token_vec(mut self) -> Vec<Token<'a>> {
                std::iter::once(self.name).chain(self.args.drain(..)).map(|f| f.into()).collect()
            }

            /// Iterate over the fields after the command's name
            pub fn iter_args(&self) -> impl Iterator<Item = &Field> {
                self.iter().skip(1)
            }

            pub fn get(&'_ self, letters: &str) -> Option<&'_ Field> {
                let letters = letters.to_ascii_uppercase();
                self.iter_args().find(|arg| arg.letters == letters)
            }
        }
    };
}

impl_commands!(
    /// Moves the head to the desired position
    /// at the fastest possible speed.
    ///
    /// *NEVER* enter a cut with rapid positioning.
    RapidMove {
        "G", 0, {
            X,
            Y,
            Z,
            E,
            F
        }
    }
    /// Interpolate along a line to the desired position,
    /// extruding or cutting on the way.
    LinearMove {
        "G", 1, {
            X,
            Y,
            Z,
            E,
            F
        }
    }
    /// Interpolate along a clockwise arc to the desired position.
    ///
    /// The machine maintains a constant distance from the arc's
    /// center `(I, J, K)`.
    ClockwiseArc {
        "G", 2, {
            X,
            Y,
            Z,
            I,
            J,
            K,
            F
        }
    }
    /// Keep the axes unmoving for the given period of time
    Dwell {
        "G", 4, {
            /// Time in seconds
            P,
            /// Time in milliseconds
            S
        }
    }
    /// Select the XY plane for arcs and canned cycles
    XyPlane {
        "G", 17, {}
    }
    /// Home the given axes, or all axes when none are given
    Home {
        "G", 28, {
            W,
            X,
            Y,
            Z
        }
    }
    /// Probe the bed and build a mesh for leveling (Prusa dialect)
    MeshBedLevel {
        "G", 80, {}
    }
    /// Cancel the active canned cycle (CNC dialect of the same opcode)
    CancelCannedCycle {
        "G", 80, {}
    }
    /// Drilling canned cycle: feed to depth `Z`, retract to `R`
    DrillCycle {
        "G", 81, {
            X,
            Y,
            /// Hole depth
            Z,
            /// Retract level
            R,
            F
        }
    }
    /// Axis words represent positions in the active coordinate system
    AbsolutePositioning {
        "G", 90, {}
    }
    /// Overwrite the current position without moving
    SetPosition {
        "G", 92, {
            X,
            Y,
            Z,
            E
        }
    }
    /// Interpret feed rates as units per minute
    FeedPerMinute {
        "G", 94, {}
    }
    /// Return to the initial Z level after a canned cycle
    ReturnToInitialZ {
        "G", 98, {}
    }
    /// Start spinning the spindle clockwise with speed `S`
    SpindleOn {
        "M", 3, {
            /// Speed
            S
        }
    }
    /// Stop spinning the spindle
    SpindleOff {
        "M", 5, {}
    }
    /// Change to the tool in slot `T`
    ToolChange {
        "M", 6, {
            T
        }
    }
    /// Signals the end of a program
    ProgramEnd {
        "M", 30, {}
    }
    /// Treat extrusion distances as relative to the current position
    RelativeExtrusion {
        "M", 83, {}
    }
    /// Disable stepper motors, or only the given axes
    DisableMotors {
        "M", 84, {
            X,
            Y,
            Z,
            E
        }
    }
    /// Set the hotend target temperature without waiting
    SetHotendTemp {
        "M", 104, {
            /// Temperature in degrees Celsius
            S
        }
    }
    /// Set the part cooling fan speed
    SetFanSpeed {
        "M", 106, {
            /// Speed from 0 to 255
            S
        }
    }
    /// Turn the part cooling fan off
    FanOff {
        "M", 107, {}
    }
    /// Set the hotend target temperature and wait until it is reached
    WaitHotendTemp {
        "M", 109, {
            S
        }
    }
    /// Report firmware capabilities; `U` asks the printer to check the version
    FirmwareInfo {
        "M", 115, {
            U
        }
    }
    /// Set the bed target temperature without waiting
    SetBedTemp {
        "M", 140, {
            S
        }
    }
    /// Set the bed target temperature and wait until it is reached
    WaitBedTemp {
        "M", 190, {
            S
        }
    }
    /// Set the extrusion flow multiplier in percent
    SetFlowRate {
        "M", 221, {
            S
        }
    }
    /// Set the linear advance factor
    LinearAdvance {
        "M", 900, {
            K
        }
    }
);
