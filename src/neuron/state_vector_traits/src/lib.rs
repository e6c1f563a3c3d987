use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};


/// Derive macro to automatically implement the `StateVector` trait for a struct of named
/// `f64` state variables, the order of the fields is the order of the state vector,
/// also generates `to_array` and `from_array` for fixed size access to the state
/// (the `StateVector` trait must be in scope where the macro is used)
#[proc_macro_derive(StateVector)]
pub fn derive_state_vector(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    // Get the name of the struct we are deriving the trait for
    let name = input.ident;

    let fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new_spanned(name, "StateVector requires named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "StateVector can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let idents: Vec<_> = fields.iter()
        .filter_map(|field| field.ident.clone())
        .collect();
    let dimension = idents.len();
    let indices: Vec<usize> = (0..dimension).collect();

    // Generate the implementation of the trait
    let expanded = quote! {
        impl StateVector for #name {
            const DIMENSION: usize = #dimension;

            fn to_state_vector(&self) -> Vec<f64> {
                vec![#(self.#idents),*]
            }

            fn load_state_vector(&mut self, values: &[f64]) {
                #(self.#idents = values[#indices];)*
            }
        }

        impl #name {
            /// Returns the state variables as a fixed size array
            pub fn to_array(&self) -> [f64; #dimension] {
                [#(self.#idents),*]
            }

            /// Builds the state from a fixed size array of state variables
            pub fn from_array(values: [f64; #dimension]) -> Self {
                #name {
                    #(#idents: values[#indices]),*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
